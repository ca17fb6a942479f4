use deepenglish_llm::LookupError;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Please enter a word")]
    InvalidInput,

    #[error("API key is not set")]
    MissingApiKey,

    #[error("Lookup failed: {0}")]
    LookupFailed(#[source] LookupError),

    /// Navigation past either end; a no-op rather than a failure
    #[error("No more words in that direction")]
    AtBoundary,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Corrupt stored value for '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
