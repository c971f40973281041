use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{QuestionRecord, QuizDocument, QuizType};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
        }
    }
}

/// Response of the generation endpoints. `quizId` is present only when the questions
/// were persisted into a topic or course quiz.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuizResponse {
    pub data: Vec<QuestionRecord>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<String>,
}

/// Quiz as returned over HTTP; topic and course references are hex strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    pub questions: Vec<QuestionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<QuizDocument> for QuizResponse {
    fn from(quiz: QuizDocument) -> Self {
        Self {
            id: quiz.id,
            name: quiz.name,
            quiz_type: quiz.quiz_type,
            topic: quiz.topic.map(|id| id.to_hex()),
            course: quiz.course.map(|id| id.to_hex()),
            questions: quiz.questions,
            created_at: quiz.created_at,
            modified_at: quiz.modified_at,
        }
    }
}
