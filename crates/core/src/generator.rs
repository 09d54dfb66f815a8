use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    config::ModelSettings,
    error::{EduError, Result},
    prompt::{quiz_prompt, summary_prompt},
    provider::Provider,
    types::{QuizQuestion, SummaryContent, VideoMetadata},
    validate::{parse_quiz_response, parse_summary_response},
};

const TEMPERATURE: f64 = 0.3;

/// Client for a chat-completions model that produces study material.
#[derive(Clone)]
pub struct ContentGenerator {
    http: Client,
    settings: ModelSettings,
}

impl ContentGenerator {
    pub fn new(settings: ModelSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(http: Client, settings: ModelSettings) -> Self {
        Self { http, settings }
    }

    pub fn provider(&self) -> Provider {
        self.settings.provider
    }

    /// Send one prompt and return the raw text of the first choice.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        info!(
            provider = self.settings.provider.name(),
            model = %self.settings.model,
            "sending request to model API"
        );

        let response = self
            .http
            .post(&self.settings.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.settings.api_key))
            .json(&serde_json::json!({
                "model": self.settings.model,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt,
                    },
                ],
                "temperature": TEMPERATURE,
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| EduError::InvalidModelResponse {
                reason: format!("no message content in {}", response),
            })?;

        debug!(content, "received model reply");
        Ok(content.to_string())
    }

    pub async fn generate_summary(&self, video: &VideoMetadata) -> Result<SummaryContent> {
        let reply = self.complete(&summary_prompt(video)).await?;
        parse_summary_response(&reply)
    }

    pub async fn generate_quiz(&self, video: &VideoMetadata) -> Result<Vec<QuizQuestion>> {
        let reply = self.complete(&quiz_prompt(video)).await?;
        parse_quiz_response(&reply)
    }
}
