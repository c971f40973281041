use async_trait::async_trait;
use mongodb::{bson::doc, Collection};

use crate::{db::Database, errors::AppResult, models::domain::Topic};

/// Name-based topic lookup, backed by the course catalogue's topic collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Topic>>;
}

pub struct MongoTopicRepository {
    collection: Collection<Topic>,
}

impl MongoTopicRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl TopicRepository for MongoTopicRepository {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Topic>> {
        let topic = self.collection.find_one(doc! { "name": name }).await?;
        Ok(topic)
    }
}
