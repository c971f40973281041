use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::AppError, models::domain::question::QuestionRecord};

/// Persisted quiz, keyed by either a topic or a course depending on its type.
/// `topic` and `course` reference catalogue documents by their `ObjectId`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDocument {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<ObjectId>,
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Copy)]
pub enum QuizType {
    #[serde(rename = "course-completion")]
    CourseCompletion,
    #[serde(rename = "topic")]
    Topic,
}

impl QuizType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizType::CourseCompletion => "course-completion",
            QuizType::Topic => "topic",
        }
    }
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "course-completion" => Ok(QuizType::CourseCompletion),
            "topic" => Ok(QuizType::Topic),
            other => Err(AppError::ValidationError(format!(
                "Unknown quiz type '{}', expected 'topic' or 'course-completion'",
                other
            ))),
        }
    }
}

/// Parses a topic or course reference supplied by a caller.
pub fn parse_reference(raw: &str, field: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| {
        AppError::ValidationError(format!(
            "{} '{}' is not a valid 24-character hex id",
            field, raw
        ))
    })
}

impl QuizDocument {
    /// Builds a new, question-less document. The identifier lands in `course` for
    /// course-completion quizzes and in `topic` for topic quizzes; the other stays unset.
    pub fn new(name: &str, quiz_type: QuizType, identifier_id: ObjectId) -> Self {
        let (topic, course) = match quiz_type {
            QuizType::CourseCompletion => (None, Some(identifier_id)),
            QuizType::Topic => (Some(identifier_id), None),
        };

        let now = Utc::now();
        QuizDocument {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            quiz_type,
            topic,
            course,
            questions: Vec::new(),
            created_at: Some(now),
            modified_at: Some(now),
        }
    }

    pub fn with_questions(mut self, questions: Vec<QuestionRecord>) -> Self {
        self.questions = questions;
        self.modified_at = Some(Utc::now());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_completion_quiz_sets_course_only() {
        let course_id = ObjectId::new();
        let quiz = QuizDocument::new("Final exam", QuizType::CourseCompletion, course_id);

        assert_eq!(quiz.course, Some(course_id));
        assert!(quiz.topic.is_none());
        assert!(quiz.questions.is_empty());
    }

    #[test]
    fn test_topic_quiz_sets_topic_only() {
        let topic_id = ObjectId::new();
        let quiz = QuizDocument::new("Ownership", QuizType::Topic, topic_id);

        assert_eq!(quiz.topic, Some(topic_id));
        assert!(quiz.course.is_none());
    }

    #[test]
    fn test_quiz_type_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&QuizType::CourseCompletion).expect("serialize");
        assert_eq!(json, "\"course-completion\"");

        let parsed: QuizType = serde_json::from_str("\"topic\"").expect("deserialize");
        assert_eq!(parsed, QuizType::Topic);
    }

    #[test]
    fn test_quiz_type_parses_from_path_segments() {
        assert_eq!("topic".parse::<QuizType>().ok(), Some(QuizType::Topic));
        assert_eq!(
            "course-completion".parse::<QuizType>().ok(),
            Some(QuizType::CourseCompletion)
        );
        assert!(matches!(
            "essay".parse::<QuizType>(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_references_are_stored_as_object_ids() {
        let topic_id = ObjectId::new();
        let quiz = QuizDocument::new("Ownership", QuizType::Topic, topic_id);
        let stored = mongodb::bson::to_document(&quiz).expect("serialize");

        assert_eq!(stored.get_str("type").ok(), Some("topic"));
        assert_eq!(stored.get_object_id("topic").ok(), Some(topic_id));
        assert!(stored.get("course").is_none());
        assert!(stored.contains_key("createdAt"));
    }

    #[test]
    fn test_parse_reference_accepts_hex_and_rejects_anything_else() {
        let id = ObjectId::new();
        assert_eq!(parse_reference(&id.to_hex(), "topicId").ok(), Some(id));
        assert_eq!(parse_reference(&format!(" {} ", id.to_hex()), "topicId").ok(), Some(id));

        for bad in ["topic-1", "", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            assert!(matches!(
                parse_reference(bad, "topicId"),
                Err(AppError::ValidationError(_))
            ));
        }
    }
}
