mod extracted_content;
mod quiz_request;
mod quiz_result;

pub use extracted_content::{ExtractedContent, UNKNOWN_TITLE};
pub use quiz_request::QuizRequest;
pub use quiz_result::QuizResult;
