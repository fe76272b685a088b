use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::Config;
use crate::constants::quiz_prompt::{system_prompt, user_prompt};
use crate::models::domain::QuestionType;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[a-zA-Z]*\s*(.*?)\s*```\s*$").expect("CODE_FENCE is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationProviderError {
    #[error("provider request failed: {0}")]
    Api(String),

    #[error("provider did not answer within {0}s")]
    Timeout(u64),

    #[error("provider returned no content")]
    EmptyResponse,

    #[error("provider content is not JSON: {0}")]
    InvalidJson(String),
}

/// External quiz generator. Returns the provider's quiz JSON untouched apart
/// from transport-level repair; validation is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate(
        &self,
        source_text: &str,
        question_count: u16,
        question_type: QuestionType,
    ) -> Result<Value, GenerationProviderError>;
}

/// Parses a chat reply that should be a JSON object, tolerating Markdown code
/// fences and prose around the object.
pub fn parse_json_content(content: &str) -> Result<Value, GenerationProviderError> {
    let unfenced = CODE_FENCE
        .captures(content)
        .and_then(|c| c.get(1))
        .map_or(content, |m| m.as_str())
        .trim();

    if unfenced.is_empty() {
        return Err(GenerationProviderError::EmptyResponse);
    }

    match serde_json::from_str::<Value>(unfenced) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let (Some(start), Some(end)) = (unfenced.find('{'), unfenced.rfind('}')) else {
                return Err(GenerationProviderError::InvalidJson(first_err.to_string()));
            };
            if end <= start {
                return Err(GenerationProviderError::InvalidJson(first_err.to_string()));
            }
            serde_json::from_str::<Value>(&unfenced[start..=end])
                .map_err(|_| GenerationProviderError::InvalidJson(first_err.to_string()))
        }
    }
}

/// The client otherwise retries 429 and 5xx replies for up to 15 minutes,
/// outliving the generation timeout. A zero budget makes the first failure final.
fn no_retry_backoff() -> ExponentialBackoff {
    ExponentialBackoffBuilder::default()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

/// Chat-completions generator for OpenAI-compatible APIs (Mistral by default).
pub struct MistralQuizGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl MistralQuizGenerator {
    pub fn new(api_base: &str, api_key: &SecretString, model: &str, timeout: Duration) -> Self {
        let config = OpenAIConfig::new()
            .with_api_base(api_base)
            .with_api_key(api_key.expose_secret());

        Self {
            client: Client::with_config(config).with_backoff(no_retry_backoff()),
            model: model.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.mistral_api_base,
            &config.mistral_api_key,
            &config.mistral_model,
            Duration::from_secs(config.generation_timeout_secs),
        )
    }

    fn build_request(&self, source_text: &str, question_count: u16, question_type: QuestionType) -> Value {
        json!({
            "model": self.model,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system_prompt(question_count, question_type) },
                { "role": "user", "content": user_prompt(source_text) }
            ]
        })
    }
}

#[async_trait]
impl QuizGenerator for MistralQuizGenerator {
    async fn generate(
        &self,
        source_text: &str,
        question_count: u16,
        question_type: QuestionType,
    ) -> Result<Value, GenerationProviderError> {
        let request = self.build_request(source_text, question_count, question_type);

        log::info!(
            "Requesting {} {} questions from {}",
            question_count,
            question_type.as_str(),
            self.model
        );

        let response: Value = tokio::time::timeout(self.timeout, self.client.chat().create_byot(request))
            .await
            .map_err(|_| GenerationProviderError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| {
                log::warn!("Quiz generation request failed: {}", e);
                GenerationProviderError::Api(e.to_string())
            })?;

        let content = response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or(GenerationProviderError::EmptyResponse)?;

        parse_json_content(content)
    }
}
