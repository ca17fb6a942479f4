use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "https://dict.youdao.com".to_string()
}

fn default_voice_type() -> u8 {
    2
}

fn default_extension() -> String {
    "mp3".to_string()
}

fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("deepenglish")
        .join("audio")
}

/// Pronunciation service and on-disk audio cache
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// `type` query parameter of the dictvoice endpoint
    #[serde(default = "default_voice_type")]
    pub voice_type: u8,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    /// External player command, invoked as `<player> <file>`
    #[serde(default)]
    pub player: Option<String>,
}

impl AudioConfig {
    pub fn new() -> Self {
        let host = env::var("AUDIO_HOST").unwrap_or_else(|_| default_host());
        let cache_dir = env::var("DEEPENGLISH_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_cache_dir());
        let player = env::var("AUDIO_PLAYER").ok().filter(|p| !p.trim().is_empty());

        Self {
            host,
            cache_dir,
            player,
            ..Self::default()
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            voice_type: default_voice_type(),
            extension: default_extension(),
            cache_dir: default_cache_dir(),
            player: None,
        }
    }
}
