
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use deepenglish_audio::{AudioFetcher, NoPlayback};
use deepenglish_config::audio::AudioConfig;
use deepenglish_config::{Config, Settings};
use deepenglish_core::store::{KeyValueStore, MemoryStore, SettingsStore};
use deepenglish_llm::{LookupError, WordLookup};
use deepenglish_types::{AppEvent, WordRecord};
use kanal::AsyncReceiver;
use tokio::time::timeout;

use crate::state::AppState;

#[derive(Default)]
pub(crate) struct FakeLookup {
    pub calls: AtomicUsize,
}

#[async_trait]
impl WordLookup for FakeLookup {
    async fn fetch(&self, word: &str, _settings: &Settings) -> Result<WordRecord, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(WordRecord {
            word: word.to_string(),
            sentence: Some(format!("I like {word}.")),
            ..WordRecord::default()
        })
    }
}

pub(crate) struct Harness {
    pub state: Arc<AppState>,
    pub kv: Arc<MemoryStore>,
    pub client: Arc<FakeLookup>,
    _cache: tempfile::TempDir,
}

/// App state over in-memory storage with an API key already saved
pub(crate) fn harness() -> Harness {
    let kv = Arc::new(MemoryStore::new());
    SettingsStore::new(kv.clone())
        .save(&Settings::new("sk-test"))
        .unwrap();

    harness_over(kv)
}

/// App state restored from `kv`; the audio host refuses connections
pub(crate) fn harness_over(kv: Arc<MemoryStore>) -> Harness {
    harness_with_env_key(kv, None)
}

/// As [`harness_over`], with `env_api_key` standing in for `DEEPSEEK_API_KEY`
pub(crate) fn harness_with_env_key(kv: Arc<MemoryStore>, env_api_key: Option<&str>) -> Harness {
    let dead = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_host = format!("http://{}", dead.local_addr().unwrap());
    drop(dead);

    let cache = tempfile::tempdir().unwrap();
    let audio = AudioConfig {
        host: dead_host,
        cache_dir: cache.path().to_path_buf(),
        ..AudioConfig::default()
    };
    let fetcher = AudioFetcher::new(&audio, Duration::from_secs(1)).unwrap();

    let client = Arc::new(FakeLookup::default());
    let state = AppState::with_parts(
        Config::default(),
        kv.clone() as Arc<dyn KeyValueStore>,
        client.clone(),
        fetcher,
        Arc::new(NoPlayback),
        env_api_key.map(str::to_string),
    );

    Harness {
        state: Arc::new(state),
        kv,
        client,
        _cache: cache,
    }
}

pub(crate) async fn next_event(rx: &AsyncReceiver<AppEvent>) -> AppEvent {
    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - event never arrived!"),
    }
}
