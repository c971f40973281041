use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson, Bson},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::Serialize;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{QuestionRecord, QuizDocument, QuizType},
};

/// Storage for quiz documents. Lookups return `Ok(None)` when nothing matches and `Err`
/// only when the store itself failed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Always inserts; no dedup on (topic|course, type).
    async fn create(&self, quiz: QuizDocument) -> AppResult<QuizDocument>;
    async fn find_by_topic_id(&self, topic_id: ObjectId) -> AppResult<Option<QuizDocument>>;
    async fn find_by_course_id(&self, course_id: ObjectId) -> AppResult<Option<QuizDocument>>;
    async fn find_by_type(&self, quiz_type: QuizType) -> AppResult<Vec<QuizDocument>>;
    /// Overwrites the question list in a single atomic update and returns the new document.
    async fn replace_questions(
        &self,
        id: &str,
        questions: Vec<QuestionRecord>,
    ) -> AppResult<QuizDocument>;
}

pub struct MongoQuizRepository {
    collection: Collection<QuizDocument>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let topic_index = IndexModel::builder()
            .keys(doc! { "topic": 1, "type": 1 })
            .options(
                IndexOptions::builder()
                    .name("topic_type".to_string())
                    .build(),
            )
            .build();

        let course_index = IndexModel::builder()
            .keys(doc! { "course": 1, "type": 1 })
            .options(
                IndexOptions::builder()
                    .name("course_type".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_indexes([id_index, topic_index, course_index])
            .await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: QuizDocument) -> AppResult<QuizDocument> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_topic_id(&self, topic_id: ObjectId) -> AppResult<Option<QuizDocument>> {
        let quiz = self
            .collection
            .find_one(doc! { "topic": topic_id, "type": QuizType::Topic.as_str() })
            .await?;
        Ok(quiz)
    }

    async fn find_by_course_id(&self, course_id: ObjectId) -> AppResult<Option<QuizDocument>> {
        let quiz = self
            .collection
            .find_one(doc! { "course": course_id, "type": QuizType::CourseCompletion.as_str() })
            .await?;
        Ok(quiz)
    }

    async fn find_by_type(&self, quiz_type: QuizType) -> AppResult<Vec<QuizDocument>> {
        let cursor = self
            .collection
            .find(doc! { "type": quiz_type.as_str() })
            .await?;
        let quizzes: Vec<QuizDocument> = cursor.try_collect().await?;
        Ok(quizzes)
    }

    async fn replace_questions(
        &self,
        id: &str,
        questions: Vec<QuestionRecord>,
    ) -> AppResult<QuizDocument> {
        let quiz = self
            .collection
            .find_one_and_update(doc! { "id": id }, questions_update(&questions)?)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;
        Ok(quiz)
    }
}

fn bson_value<T: Serialize>(value: &T) -> AppResult<Bson> {
    to_bson(value).map_err(|e| AppError::InternalError(format!("BSON encoding failed: {}", e)))
}

fn questions_update(questions: &[QuestionRecord]) -> AppResult<mongodb::bson::Document> {
    Ok(doc! {
        "$set": {
            "questions": bson_value(&questions)?,
            "modifiedAt": bson_value(&Utc::now())?,
        }
    })
}
