use std::sync::Arc;

use deepenglish_config::Settings;
use deepenglish_llm::WordLookup;
use deepenglish_types::{Direction, LookupSource, WordRecord};
use tokio::sync::Mutex;

use crate::error::ControllerError;
use crate::history::History;
use crate::session::Session;

/// Outcome of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub record: WordRecord,
    pub source: LookupSource,
    /// Position of `record` in the history
    pub index: usize,
}

/// Record under the cursor plus navigation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub record: WordRecord,
    pub can_previous: bool,
    pub can_next: bool,
}

/// Resolves words through the history cache or the lookup client.
///
/// The session lock is held for the whole of a lookup, network call
/// included, so concurrent lookups run one after another in arrival order.
pub struct LookupController {
    client: Arc<dyn WordLookup>,
    session: Mutex<Session>,
}

impl LookupController {
    pub fn new(client: Arc<dyn WordLookup>, session: Session) -> Self {
        Self {
            client,
            session: Mutex::new(session),
        }
    }

    pub async fn lookup(&self, word: &str) -> Result<Lookup, ControllerError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(ControllerError::InvalidInput);
        }

        let mut session = self.session.lock().await;

        if !session.settings.has_api_key() {
            return Err(ControllerError::MissingApiKey);
        }

        if let Some(index) = session.history.position(word)
            && let Some(record) = session.history.select(index)
        {
            tracing::info!("'{}' served from history at {}", word, index);
            return Ok(Lookup {
                record: record.clone(),
                source: LookupSource::Cache,
                index,
            });
        }

        tracing::info!("Looking up '{}' remotely", word);
        let record = self
            .client
            .fetch(word, &session.settings)
            .await
            .map_err(|e| {
                tracing::warn!("Lookup of '{}' failed: {}", word, e);
                ControllerError::LookupFailed(e)
            })?;

        let index = session.history.push(record.clone());

        Ok(Lookup {
            record,
            source: LookupSource::Remote,
            index,
        })
    }

    pub async fn navigate(&self, direction: Direction) -> Result<WordRecord, ControllerError> {
        let mut session = self.session.lock().await;

        session
            .history
            .step(direction)
            .cloned()
            .ok_or(ControllerError::AtBoundary)
    }

    pub async fn current(&self) -> Option<CurrentView> {
        let session = self.session.lock().await;
        let history = &session.history;

        history.current().map(|record| CurrentView {
            record: record.clone(),
            can_previous: history.can_go_previous(),
            can_next: history.can_go_next(),
        })
    }

    pub async fn can_go_previous(&self) -> bool {
        self.session.lock().await.history.can_go_previous()
    }

    pub async fn can_go_next(&self) -> bool {
        self.session.lock().await.history.can_go_next()
    }

    pub async fn settings(&self) -> Settings {
        self.session.lock().await.settings.clone()
    }

    pub async fn update_settings(&self, settings: Settings) {
        self.session.lock().await.settings = settings;
    }

    /// Copy of the history for persistence
    pub async fn snapshot(&self) -> History {
        self.session.lock().await.history.clone()
    }
}
