pub mod question;
pub mod quiz;
pub mod quiz_request;
pub mod topic;

pub use question::QuestionRecord;
pub use quiz::{parse_reference, QuizDocument, QuizType};
pub use quiz_request::{QuizKind, QuizRequest};
pub use topic::Topic;
