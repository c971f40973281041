#[cfg(test)]
pub mod fixtures {
    use mongodb::bson::oid::ObjectId;

    use crate::models::domain::{QuizDocument, QuizType};

    /// One question block in the shape the model is asked to produce.
    pub fn question_block(question: &str, correct: &str) -> String {
        serde_json::json!({
            "Q": question,
            "A": "first",
            "B": "second",
            "C": "third",
            "D": "fourth",
            "Correct": correct,
            "Explanation": format!("Explains {}", question),
        })
        .to_string()
    }

    /// `count` well-formed blocks, `---` separated and wrapped in a json code fence.
    pub fn model_output(count: usize) -> String {
        let blocks: Vec<String> = (0..count)
            .map(|i| question_block(&format!("Question {}", i + 1), ["A", "B", "C", "D"][i % 4]))
            .collect();
        format!("```json\n{}\n```", blocks.join("\n---\n"))
    }

    pub fn topic_quiz(topic_id: ObjectId) -> QuizDocument {
        QuizDocument::new("Topic quiz", QuizType::Topic, topic_id)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents a client error (4xx)
    pub fn assert_client_error(status: StatusCode) {
        assert!(
            status.is_client_error(),
            "Expected client error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::quiz_parser::parse_quiz_response;

    #[test]
    fn test_fixture_model_output_parses_completely() {
        let parsed = parse_quiz_response(&model_output(6));

        assert_eq!(parsed.questions.len(), 6);
        assert!(parsed.rejected.is_empty());
        assert_eq!(parsed.questions[5].question, "Question 6");
        assert_eq!(parsed.questions[5].answer_index, 1);
    }

    #[test]
    fn test_fixture_topic_quiz() {
        let topic_id = mongodb::bson::oid::ObjectId::new();
        let quiz = topic_quiz(topic_id);
        assert_eq!(quiz.topic, Some(topic_id));
        assert!(quiz.course.is_none());
    }
}
