pub mod classifier;
pub mod lifecycle;
pub mod submission_ctx;

pub use classifier::{classify, Classification};
pub use lifecycle::{Failure, SolveOutcome, SolveSession, TRANSPORT_FAILURE_MESSAGE};
pub use submission_ctx::{RequestState, SubmissionCtx};
