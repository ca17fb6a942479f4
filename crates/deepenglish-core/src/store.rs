use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use deepenglish_config::Settings;
use deepenglish_types::WordRecord;

use crate::error::StoreError;

pub const KEY_API_KEY: &str = "deepseek_api_key";
pub const KEY_SYSTEM_PROMPT: &str = "llm_system_prompt";
pub const KEY_PROMPT_TEMPLATE: &str = "prompt_template";
pub const KEY_WORD_HISTORY: &str = "word_history";
pub const KEY_CURRENT_INDEX: &str = "current_index";

/// String key-value persistence
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String);

    /// Write pending changes to durable storage
    fn flush(&self) -> Result<(), StoreError>;
}

fn lock(map: &Mutex<BTreeMap<String, String>>) -> MutexGuard<'_, BTreeMap<String, String>> {
    map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        lock(&self.values).insert(key.to_string(), value);
    }

    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// All keys in one JSON object file
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let values = if path.exists() {
            tracing::info!("Loading store from {}", path.display());
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            tracing::info!("No store at {}, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Like [`JsonFileStore::open`], but an unreadable file is moved aside to
    /// `<name>.json.bad` and the store starts empty.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        match Self::open(&path) {
            Ok(store) => store,
            Err(e) => {
                tracing::error!("Store at {} is unreadable, starting empty: {}", path.display(), e);

                let bad = path.with_extension("json.bad");
                if let Err(e) = fs::rename(&path, &bad) {
                    tracing::warn!("Could not move {} aside: {}", path.display(), e);
                }

                Self {
                    path,
                    values: Mutex::new(BTreeMap::new()),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        lock(&self.values).insert(key.to_string(), value);
    }

    fn flush(&self) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(&*lock(&self.values))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!("Flushed store to {}", self.path.display());
        Ok(())
    }
}

/// Word history persisted as one serialized blob plus the cursor
#[derive(Clone)]
pub struct HistoryStore {
    kv: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stored records and index; `([], -1)` when nothing was saved
    pub fn load(&self) -> Result<(Vec<WordRecord>, i64), StoreError> {
        let Some(blob) = self.kv.get(KEY_WORD_HISTORY) else {
            return Ok((Vec::new(), -1));
        };

        let records: Vec<WordRecord> =
            serde_json::from_str(&blob).map_err(|e| StoreError::Corrupt {
                key: KEY_WORD_HISTORY.to_string(),
                reason: e.to_string(),
            })?;

        let index = match self.kv.get(KEY_CURRENT_INDEX) {
            Some(raw) => raw.trim().parse().map_err(|_| StoreError::Corrupt {
                key: KEY_CURRENT_INDEX.to_string(),
                reason: format!("not an integer: {raw}"),
            })?,
            None => -1,
        };

        Ok((records, index))
    }

    /// Replace the stored history
    pub fn save(&self, records: &[WordRecord], index: i64) -> Result<(), StoreError> {
        self.kv.set(KEY_WORD_HISTORY, serde_json::to_string(records)?);
        self.kv.set(KEY_CURRENT_INDEX, index.to_string());
        self.kv.flush()?;

        tracing::info!("Saved {} history entries (index {})", records.len(), index);
        Ok(())
    }
}

#[derive(Clone)]
pub struct SettingsStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stored settings, built-in defaults for anything unset
    pub fn load(&self) -> Settings {
        let defaults = Settings::default();

        Settings {
            api_key: self.kv.get(KEY_API_KEY).unwrap_or(defaults.api_key),
            system_prompt: self
                .kv
                .get(KEY_SYSTEM_PROMPT)
                .unwrap_or(defaults.system_prompt),
            prompt_template: self
                .kv
                .get(KEY_PROMPT_TEMPLATE)
                .unwrap_or(defaults.prompt_template),
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        self.kv.set(KEY_API_KEY, settings.api_key.clone());
        self.kv.set(KEY_SYSTEM_PROMPT, settings.system_prompt.clone());
        self.kv.set(KEY_PROMPT_TEMPLATE, settings.prompt_template.clone());
        self.kv.flush()
    }
}
