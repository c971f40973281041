pub mod quiz_repository;
pub mod topic_repository;

pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use topic_repository::{MongoTopicRepository, TopicRepository};
