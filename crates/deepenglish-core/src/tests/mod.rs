
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use deepenglish_config::Settings;
use deepenglish_llm::{LookupError, WordLookup};
use deepenglish_types::{Translation, WordRecord};

pub(crate) fn record(word: &str) -> WordRecord {
    WordRecord {
        word: word.to_string(),
        sentence: Some(format!("This is {word}.")),
        phonetics: Some(format!("/{word}/")),
        translations: vec![Translation {
            part_of_speech: Some("n.".to_string()),
            definition: Some("释义".to_string()),
        }],
        ..WordRecord::default()
    }
}

/// Lookup client returning canned answers and counting calls
#[derive(Default)]
pub(crate) struct FakeLookup {
    calls: AtomicUsize,
    failures: Mutex<HashMap<String, fn() -> LookupError>>,
    delay: Option<Duration>,
}

impl FakeLookup {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub(crate) fn fail_on(self, word: &str, error: fn() -> LookupError) -> Self {
        self.failures.lock().unwrap().insert(word.to_string(), error);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WordLookup for FakeLookup {
    async fn fetch(&self, word: &str, _settings: &Settings) -> Result<WordRecord, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failures.lock().unwrap().get(word).copied();
        if let Some(make_error) = failure {
            return Err(make_error());
        }

        Ok(record(word))
    }
}
