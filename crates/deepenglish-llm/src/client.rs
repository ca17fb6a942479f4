use std::time::{Duration, Instant};

use async_trait::async_trait;
use deepenglish_config::Settings;
use deepenglish_config::llm::LlmConfig;
use deepenglish_types::WordRecord;

use crate::request::{ChatRequest, parse_answer};
use crate::{LookupError, WordLookup};

/// Chat-completion client for DeepSeek-compatible endpoints
#[derive(Clone)]
pub struct DeepSeekClient {
    client: reqwest::Client,
    api_url: String,
    model: String,
}

impl DeepSeekClient {
    pub fn new(config: &LlmConfig, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl WordLookup for DeepSeekClient {
    async fn fetch(&self, word: &str, settings: &Settings) -> Result<WordRecord, LookupError> {
        let request = ChatRequest::for_word(&self.model, settings, word);
        let started = Instant::now();

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&settings.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(
            "Chat completion for '{}': HTTP {} in {:?}",
            word,
            status,
            started.elapsed()
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Chat completion failed with HTTP {}: {}", status, body);
            return Err(LookupError::HttpStatus { status, body });
        }

        let body = response.bytes().await?;
        parse_answer(&body, word).inspect_err(|e| {
            tracing::error!(
                "Failed to parse answer for '{}': {}. Body: {}",
                word,
                e,
                String::from_utf8_lossy(&body)
            );
        })
    }
}
