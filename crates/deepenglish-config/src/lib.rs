use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use self::audio::AudioConfig;
use self::llm::LlmConfig;
use self::storage::StorageConfig;

pub mod audio;
pub mod llm;
pub mod settings;
pub mod storage;

pub use settings::{Settings, SettingsError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub audio: AudioConfig,
    pub storage: StorageConfig,

    /// Connect/read deadline applied to every outbound request
    pub timeout_seconds: u64,
    /// Capacity of the front end -> event loop channel
    pub event_queue: usize,
}

impl Config {
    pub fn new() -> Self {
        let timeout_seconds = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30); // 30 seconds default

        Config {
            llm: LlmConfig::new(),
            audio: AudioConfig::new(),
            storage: StorageConfig::new(),

            timeout_seconds,
            event_queue: 64,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
