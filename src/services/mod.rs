pub mod export;
pub mod presentation;

pub use export::plain_text;
pub use presentation::{ConsoleReporter, ErrorReporter, HtmlPageSink, PresentationSink, ViewState};
