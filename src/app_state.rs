use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizRepository, MongoTopicRepository},
    services::{
        llm_client::OpenAiTextGenerator,
        prompt_builder::{PromptBuilder, PromptTemplates},
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    /// `None` only when the state is assembled around in-memory collaborators.
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db, &config.quizzes_collection));
        quiz_repository.ensure_indexes().await?;
        let topic_repository = Arc::new(MongoTopicRepository::new(&db, &config.topics_collection));

        let templates = match &config.prompt_templates_path {
            Some(path) => PromptTemplates::load(path)?,
            None => PromptTemplates::default(),
        };
        log::info!("Using prompt templates version {}", templates.version);

        let generator = Arc::new(OpenAiTextGenerator::new(&config));
        let quiz_service = Arc::new(QuizService::new(
            generator,
            PromptBuilder::new(templates),
            quiz_repository,
            topic_repository,
        ));

        log::info!("Application state ready (database '{}')", db.db_name());

        Ok(Self {
            quiz_service,
            db: Some(db),
            config: Arc::new(config),
        })
    }

    pub fn with_service(config: Config, quiz_service: Arc<QuizService>) -> Self {
        Self {
            quiz_service,
            db: None,
            config: Arc::new(config),
        }
    }
}
