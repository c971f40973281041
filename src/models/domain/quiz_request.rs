use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::quiz::{parse_reference, QuizType},
};

/// Selects the prompt template and, for keyed kinds, the persistence key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizKind {
    AdHoc,
    Topic,
    CourseCompletion,
}

impl QuizKind {
    pub fn quiz_type(&self) -> Option<QuizType> {
        match self {
            QuizKind::AdHoc => None,
            QuizKind::Topic => Some(QuizType::Topic),
            QuizKind::CourseCompletion => Some(QuizType::CourseCompletion),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizRequest {
    topics: Vec<String>,
    kind: QuizKind,
    identifier: Option<ObjectId>,
}

impl QuizRequest {
    /// Topics must be non-empty and non-blank; an identifier is required for topic and
    /// course-completion quizzes and forbidden for ad-hoc ones. Identifiers are hex
    /// `ObjectId`s.
    pub fn new(topics: Vec<String>, kind: QuizKind, identifier: Option<String>) -> AppResult<Self> {
        if topics.is_empty() {
            return Err(AppError::ValidationError(
                "Topics must be a non-empty array".to_string(),
            ));
        }
        if topics.iter().any(|t| t.trim().is_empty()) {
            return Err(AppError::ValidationError(
                "Topic names must not be blank".to_string(),
            ));
        }

        let identifier = identifier.filter(|id| !id.trim().is_empty());
        match (kind, &identifier) {
            (QuizKind::AdHoc, Some(_)) => {
                return Err(AppError::ValidationError(
                    "Ad-hoc quizzes do not take an identifier".to_string(),
                ))
            }
            (QuizKind::Topic, None) => {
                return Err(AppError::ValidationError("topicId is required".to_string()))
            }
            (QuizKind::CourseCompletion, None) => {
                return Err(AppError::ValidationError("courseId is required".to_string()))
            }
            _ => {}
        }

        let field = match kind {
            QuizKind::CourseCompletion => "courseId",
            _ => "topicId",
        };
        let identifier = identifier
            .map(|id| parse_reference(&id, field))
            .transpose()?;

        Ok(Self {
            topics,
            kind,
            identifier,
        })
    }

    pub fn ad_hoc(topics: Vec<String>) -> AppResult<Self> {
        Self::new(topics, QuizKind::AdHoc, None)
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn identifier(&self) -> Option<ObjectId> {
        self.identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics() -> Vec<String> {
        vec!["Ownership".to_string(), "Borrowing".to_string()]
    }

    #[test]
    fn test_ad_hoc_request_without_identifier_is_valid() {
        let request = QuizRequest::ad_hoc(topics()).expect("valid request");
        assert_eq!(request.kind(), QuizKind::AdHoc);
        assert_eq!(request.topics().len(), 2);
        assert!(request.identifier().is_none());
    }

    #[test]
    fn test_empty_topics_are_rejected() {
        let err = QuizRequest::ad_hoc(vec![]).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_blank_topic_names_are_rejected() {
        let err = QuizRequest::ad_hoc(vec!["Traits".into(), "   ".into()]).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_keyed_kinds_require_an_identifier() {
        assert!(QuizRequest::new(topics(), QuizKind::Topic, None).is_err());
        assert!(QuizRequest::new(topics(), QuizKind::CourseCompletion, Some(" ".into())).is_err());
        let request =
            QuizRequest::new(topics(), QuizKind::Topic, Some(ObjectId::new().to_hex()));
        assert!(request.is_ok());
    }

    #[test]
    fn test_identifier_must_be_an_object_id() {
        let err = QuizRequest::new(topics(), QuizKind::Topic, Some("t-1".into())).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(ref msg) if msg.contains("topicId")));

        let course_id = ObjectId::new();
        let request = QuizRequest::new(
            topics(),
            QuizKind::CourseCompletion,
            Some(course_id.to_hex()),
        )
        .expect("valid request");
        assert_eq!(request.identifier(), Some(course_id));
    }

    #[test]
    fn test_ad_hoc_kind_rejects_an_identifier() {
        let identifier = Some(ObjectId::new().to_hex());
        assert!(QuizRequest::new(topics(), QuizKind::AdHoc, identifier).is_err());
    }

    #[test]
    fn test_kinds_map_to_persisted_types() {
        assert_eq!(QuizKind::AdHoc.quiz_type(), None);
        assert_eq!(QuizKind::Topic.quiz_type(), Some(QuizType::Topic));
        assert_eq!(
            QuizKind::CourseCompletion.quiz_type(),
            Some(QuizType::CourseCompletion)
        );
    }
}
