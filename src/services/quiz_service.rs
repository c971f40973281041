use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{parse_reference, QuestionRecord, QuizDocument, QuizRequest, QuizType},
    repositories::{QuizRepository, TopicRepository},
    services::{
        llm_client::TextGenerator, prompt_builder::PromptBuilder,
        quiz_parser::parse_quiz_response,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuiz {
    pub questions: Vec<QuestionRecord>,
    pub rejected_blocks: usize,
    /// Set when the questions were stored on a topic or course quiz.
    pub quiz_id: Option<String>,
}

pub struct QuizService {
    generator: Arc<dyn TextGenerator>,
    prompts: PromptBuilder,
    quizzes: Arc<dyn QuizRepository>,
    topics: Arc<dyn TopicRepository>,
}

impl QuizService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        prompts: PromptBuilder,
        quizzes: Arc<dyn QuizRepository>,
        topics: Arc<dyn TopicRepository>,
    ) -> Self {
        Self {
            generator,
            prompts,
            quizzes,
            topics,
        }
    }

    /// Prompt, call the model, parse. Keyed requests also store the questions on the
    /// (key, type) quiz, creating it first if needed. An empty result is still a success
    /// but is never written over an existing quiz.
    pub async fn generate(
        &self,
        request: &QuizRequest,
        name: Option<&str>,
    ) -> AppResult<GeneratedQuiz> {
        let prompt = self.prompts.build(request.kind(), request.topics());
        log::info!(
            "Generating {:?} quiz for {} topic(s) with templates {}",
            request.kind(),
            request.topics().len(),
            self.prompts.templates_version()
        );

        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            log::error!("Quiz generation failed: {}", e);
            e
        })?;

        let parsed = parse_quiz_response(&raw);
        log::info!(
            "Parsed {} question(s), rejected {} block(s)",
            parsed.questions.len(),
            parsed.rejected.len()
        );

        let quiz_id = match (request.kind().quiz_type(), request.identifier()) {
            (Some(quiz_type), Some(identifier)) if !parsed.questions.is_empty() => {
                let name = name
                    .map(str::to_string)
                    .unwrap_or_else(|| default_quiz_name(quiz_type, request.topics()));
                let quiz = self
                    .store_questions(quiz_type, identifier, &name, parsed.questions.clone())
                    .await?;
                Some(quiz.id)
            }
            _ => None,
        };

        Ok(GeneratedQuiz {
            questions: parsed.questions,
            rejected_blocks: parsed.rejected.len(),
            quiz_id,
        })
    }

    async fn store_questions(
        &self,
        quiz_type: QuizType,
        identifier: ObjectId,
        name: &str,
        questions: Vec<QuestionRecord>,
    ) -> AppResult<QuizDocument> {
        let existing = match quiz_type {
            QuizType::Topic => self.quizzes.find_by_topic_id(identifier).await?,
            QuizType::CourseCompletion => self.quizzes.find_by_course_id(identifier).await?,
        };

        let quiz = match existing {
            Some(quiz) => quiz,
            None => self.insert_quiz(name, quiz_type, identifier).await?,
        };

        let count = questions.len();
        let quiz = self.quizzes.replace_questions(&quiz.id, questions).await?;
        log::info!("Stored {} question(s) on {} quiz {}", count, quiz_type, quiz.id);
        Ok(quiz)
    }

    pub async fn create_quiz(
        &self,
        name: &str,
        quiz_type: QuizType,
        identifier_id: &str,
    ) -> AppResult<QuizDocument> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError("Quiz name must not be blank".to_string()));
        }
        let identifier = parse_reference(identifier_id, "identifierId")?;

        self.insert_quiz(name, quiz_type, identifier).await
    }

    async fn insert_quiz(
        &self,
        name: &str,
        quiz_type: QuizType,
        identifier_id: ObjectId,
    ) -> AppResult<QuizDocument> {
        let quiz = QuizDocument::new(name, quiz_type, identifier_id);
        let quiz = self.quizzes.create(quiz).await?;
        log::info!("Created {} quiz {} for {}", quiz_type, quiz.id, identifier_id);
        Ok(quiz)
    }

    pub async fn get_quiz_by_topic_id(&self, topic_id: &str) -> AppResult<Option<QuizDocument>> {
        let topic_id = parse_reference(topic_id, "topicId")?;
        self.quizzes.find_by_topic_id(topic_id).await
    }

    pub async fn get_quiz_by_course_id(&self, course_id: &str) -> AppResult<Option<QuizDocument>> {
        let course_id = parse_reference(course_id, "courseId")?;
        self.quizzes.find_by_course_id(course_id).await
    }

    /// Resolves the name first; an unknown topic short-circuits to `None`.
    pub async fn get_quiz_by_topic_name(
        &self,
        topic_name: &str,
    ) -> AppResult<Option<QuizDocument>> {
        let Some(topic) = self.topics.find_by_name(topic_name).await? else {
            log::debug!("No topic named '{}'", topic_name);
            return Ok(None);
        };

        self.quizzes.find_by_topic_id(topic.id).await
    }

    pub async fn list_quizzes_by_type(&self, quiz_type: QuizType) -> AppResult<Vec<QuizDocument>> {
        self.quizzes.find_by_type(quiz_type).await
    }
}

fn default_quiz_name(quiz_type: QuizType, topics: &[String]) -> String {
    match quiz_type {
        QuizType::Topic => format!("Topic quiz: {}", topics.join(", ")),
        QuizType::CourseCompletion => format!("Course completion quiz: {}", topics.join(", ")),
    }
}
