pub mod loaders;
pub mod response;
pub mod submission;
pub mod upload;

pub use loaders::load_image;
pub use response::ServiceResponse;
pub use submission::{SolveRequest, Submission, SubmissionMode};
pub use upload::ImageUpload;
