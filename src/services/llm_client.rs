use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::prompt_builder::Prompt,
};

pub const GENERATION_TEMPERATURE: f32 = 0.7;

/// Hosted text-generation model. Returns the raw completion text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Talks to any OpenAI-compatible chat completion endpoint (Gemini by default).
pub struct OpenAiTextGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiTextGenerator {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_base(config.llm_api_base.clone())
            .with_api_key(config.llm_api_key.expose_secret());

        Self {
            client: Client::with_config(openai_config).with_backoff(single_attempt()),
            model: config.llm_model.clone(),
            timeout: config.llm_timeout(),
        }
    }

    fn request_body<'a>(&'a self, prompt: &'a Prompt) -> ChatCompletionBody<'a> {
        ChatCompletionBody {
            model: &self.model,
            temperature: GENERATION_TEMPERATURE,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate(&self, prompt: &Prompt) -> AppResult<String> {
        let body = self.request_body(prompt);
        log::debug!("Requesting completion from model '{}'", self.model);

        let completion: ChatCompletion =
            tokio::time::timeout(self.timeout, self.client.chat().create_byot(body))
                .await
                .map_err(|_| AppError::GenerationTimeout(self.timeout.as_secs()))??;

        extract_text(completion)
    }
}

// A failed completion is reported to the caller as-is; the provider is never re-asked.
fn single_attempt() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

fn extract_text(completion: ChatCompletion) -> AppResult<String> {
    completion
        .choices
        .into_iter()
        .find_map(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::GenerationFailed("Model returned no text".to_string()))
}
