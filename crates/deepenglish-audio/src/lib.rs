mod fetcher;
mod playback;

#[cfg(test)]
mod tests;

pub use fetcher::{AudioFetcher, cache_file_name};
pub use playback::{AudioService, CommandPlayback, NoPlayback, Playback};

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Word is empty")]
    InvalidInput,

    #[error("Audio fetch failed: {0}")]
    FetchFailed(#[from] reqwest::Error),

    #[error("Audio fetch failed: HTTP {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("Audio cache write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Playback failed: {0}")]
    Playback(String),
}
