use serde::Deserialize;
use validator::Validate;

use crate::models::domain::QuizType;

/// Body of `POST /quiz/generate`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Topics must be a non-empty array"))]
    pub topics: Vec<String>,
}

/// Body of `POST /quiz/generate-topic`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTopicQuizRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Topics must be a non-empty array"))]
    pub topics: Vec<String>,

    pub topic_id: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
}

/// Body of `POST /quiz/generate-course`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCourseQuizRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Topics must be a non-empty array"))]
    pub topics: Vec<String>,

    pub course_id: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[serde(rename = "type")]
    pub quiz_type: QuizType,

    #[validate(length(min = 1, max = 100))]
    pub identifier_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_valid_generate_request() {
        let request: GenerateQuizRequest =
            serde_json::from_str(r#"{"topics":["Closures","Iterators"]}"#).expect("parse");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_topics_fail_validation() {
        let request: GenerateQuizRequest = serde_json::from_str("{}").expect("parse");
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("Topics must be a non-empty array"));
    }

    #[test]
    fn test_empty_topics_fail_validation() {
        let request: GenerateTopicQuizRequest =
            serde_json::from_str(r#"{"topics":[],"topicId":"t-1"}"#).expect("parse");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_course_request_reads_camel_case_identifier() {
        let request: GenerateCourseQuizRequest =
            serde_json::from_str(r#"{"topics":["Async"],"courseId":"c-9"}"#).expect("parse");
        assert_eq!(request.course_id.as_deref(), Some("c-9"));
        assert!(request.name.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_quiz_request() {
        let request: CreateQuizRequest = serde_json::from_str(
            r#"{"name":"Final","type":"course-completion","identifierId":"c-1"}"#,
        )
        .expect("parse");
        assert_eq!(request.quiz_type, QuizType::CourseCompletion);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_quiz_request_with_empty_name() {
        let request = CreateQuizRequest {
            name: String::new(),
            quiz_type: QuizType::Topic,
            identifier_id: "t-1".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
