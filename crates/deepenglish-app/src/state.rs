use std::env;
use std::sync::Arc;

use deepenglish_audio::{AudioFetcher, AudioService, CommandPlayback, NoPlayback, Playback};
use deepenglish_config::{Config, Settings};
use deepenglish_core::store::{HistoryStore, JsonFileStore, KeyValueStore, SettingsStore};
use deepenglish_core::{History, LookupController, Session, StoreError};
use deepenglish_llm::{DeepSeekClient, WordLookup};

pub struct AppState {
    pub config: Config,
    pub controller: LookupController,
    pub audio: Arc<AudioService>,
    pub settings_store: SettingsStore,
    pub history_store: HistoryStore,
    /// API key seeded from `DEEPSEEK_API_KEY`; never written to the store
    env_api_key: Option<String>,
}

impl AppState {
    /// Open the on-disk store and restore the previous session
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = JsonFileStore::open_or_empty(config.storage.store_path());
        tracing::info!("Settings and history in {}", store.path().display());
        let kv: Arc<dyn KeyValueStore> = Arc::new(store);

        let client: Arc<dyn WordLookup> =
            Arc::new(DeepSeekClient::new(&config.llm, config.timeout())?);

        let playback: Arc<dyn Playback> = match &config.audio.player {
            Some(program) => Arc::new(CommandPlayback::new(program.clone())),
            None => Arc::new(NoPlayback),
        };
        let fetcher = AudioFetcher::new(&config.audio, config.timeout())?;

        Ok(Self::with_parts(
            config,
            kv,
            client,
            fetcher,
            playback,
            env::var("DEEPSEEK_API_KEY").ok(),
        ))
    }

    pub fn with_parts(
        config: Config,
        kv: Arc<dyn KeyValueStore>,
        client: Arc<dyn WordLookup>,
        fetcher: AudioFetcher,
        playback: Arc<dyn Playback>,
        env_api_key: Option<String>,
    ) -> Self {
        let settings_store = SettingsStore::new(kv.clone());
        let history_store = HistoryStore::new(kv);

        let mut settings = settings_store.load();
        let env_api_key = match env_api_key {
            Some(key) if !settings.has_api_key() && !key.trim().is_empty() => {
                tracing::info!("Using API key from DEEPSEEK_API_KEY");
                settings.api_key = key.clone();
                Some(key)
            }
            _ => None,
        };
        if let Err(e) = settings.validate() {
            tracing::warn!("Stored settings are unusable: {e}");
        }

        let history = match history_store.load() {
            Ok((records, index)) => {
                tracing::info!("Restored {} history entries", records.len());
                History::from_parts(records, index)
            }
            Err(e) => {
                tracing::error!("Failed to load history, starting empty: {e}");
                History::new()
            }
        };

        Self {
            config,
            controller: LookupController::new(client, Session::new(settings, history)),
            audio: Arc::new(AudioService::new(fetcher, playback)),
            settings_store,
            history_store,
            env_api_key,
        }
    }

    /// Store `settings`. Unless the user just entered the key, a key that
    /// only came from the environment is left out and the stored one kept.
    pub fn save_settings(&self, settings: &Settings, key_entered: bool) -> Result<(), StoreError> {
        let mut stored = settings.clone();
        if !key_entered && self.env_api_key.as_deref() == Some(settings.api_key.as_str()) {
            stored.api_key = self.settings_store.load().api_key;
        }

        self.settings_store.save(&stored)
    }

    /// Release playback and flush history; run once on shutdown
    pub async fn persist(&self) -> anyhow::Result<()> {
        self.audio.release();

        let history = self.controller.snapshot().await;
        self.history_store.save(history.records(), history.index())?;

        Ok(())
    }
}
