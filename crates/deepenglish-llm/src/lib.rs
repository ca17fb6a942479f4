mod client;
mod request;

#[cfg(test)]
mod tests;

pub use client::DeepSeekClient;
pub use reqwest::StatusCode;
pub use request::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat, parse_answer};

use deepenglish_config::Settings;
use deepenglish_types::WordRecord;

/// Word-lookup provider interface
#[async_trait::async_trait]
pub trait WordLookup: Send + Sync {
    /// Describe `word` using the prompts in `settings`.
    ///
    /// The returned record's `word` is always `word` exactly as passed in.
    /// Implementations never retry.
    async fn fetch(&self, word: &str, settings: &Settings) -> Result<WordRecord, LookupError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: StatusCode,
        body: String,
    },

    #[error("Model returned no answer")]
    EmptyResponse,

    #[error("Malformed answer: {0}")]
    MalformedAnswer(String),
}

impl LookupError {
    /// Transport or HTTP-status failure, as opposed to a bad answer
    pub fn is_network(&self) -> bool {
        matches!(self, Self::NetworkError(_) | Self::HttpStatus { .. })
    }
}
