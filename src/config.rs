use std::{env, path::Path, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_LLM_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_LLM_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;
pub const MIN_LLM_TIMEOUT_SECS: u64 = 1;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub quizzes_collection: String,
    pub topics_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
    pub llm_api_key: SecretString,
    pub llm_api_base: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub prompt_templates_path: Option<String>,
    pub app_env: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "quizforge-local".to_string()),
            quizzes_collection: env::var("QUIZZES_COLLECTION")
                .unwrap_or_else(|_| "quizzes".to_string()),
            topics_collection: env::var("TOPICS_COLLECTION")
                .unwrap_or_else(|_| "topics".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            llm_api_key: SecretString::from(
                env::var("GOOGLE_GENERATIVE_API_KEY").unwrap_or_default(),
            ),
            llm_api_base: env::var("LLM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_LLM_API_BASE.to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
            llm_timeout_secs: parse_timeout_secs(env::var("LLM_TIMEOUT_SECS").ok().as_deref()),
            prompt_templates_path: env::var("PROMPT_TEMPLATES_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs.max(MIN_LLM_TIMEOUT_SECS))
    }

    /// Rejects settings that would only fail later, at the first generation request.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if self.llm_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::InternalError(
                "GOOGLE_GENERATIVE_API_KEY is not set".to_string(),
            ));
        }

        if self.llm_timeout_secs == 0 {
            return Err(AppError::InternalError(
                "LLM_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        if let Some(path) = &self.prompt_templates_path {
            if !Path::new(path).is_file() {
                return Err(AppError::InternalError(format!(
                    "PROMPT_TEMPLATES_PATH '{}' does not point to a file",
                    path
                )));
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizforge-test".to_string(),
            quizzes_collection: "quizzes".to_string(),
            topics_collection: "topics".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: "http://localhost:5173".to_string(),
            llm_api_key: SecretString::from("test-api-key".to_string()),
            llm_api_base: DEFAULT_LLM_API_BASE.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout_secs: 5,
            prompt_templates_path: None,
            app_env: "test".to_string(),
        }
    }
}

/// Unparseable values fall back to the default; zero is raised to the minimum.
fn parse_timeout_secs(raw: Option<&str>) -> u64 {
    match raw.and_then(|s| s.trim().parse::<u64>().ok()) {
        Some(secs) => {
            if secs < MIN_LLM_TIMEOUT_SECS {
                log::warn!(
                    "LLM_TIMEOUT_SECS={} is below the minimum, using {}s",
                    secs,
                    MIN_LLM_TIMEOUT_SECS
                );
            }
            secs.max(MIN_LLM_TIMEOUT_SECS)
        }
        None => DEFAULT_LLM_TIMEOUT_SECS,
    }
}
