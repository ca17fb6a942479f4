use serde::{Deserialize, Deserializer, Serialize};

/// Structured result of one word lookup.
///
/// Field names on the wire follow the answer format the model is asked to
/// produce, which is also the persisted history format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WordRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub word: String,
    #[serde(default)]
    pub sentence: Option<String>,
    #[serde(default)]
    pub sentence_translation: Option<String>,
    #[serde(default)]
    pub sentence_grammar: Option<String>,
    #[serde(default)]
    pub phonetics: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub translations: Vec<Translation>,
}

impl WordRecord {
    /// Case-insensitive identity check against a query word
    pub fn matches(&self, word: &str) -> bool {
        self.word.to_lowercase() == word.to_lowercase()
    }

    /// Same record with its identity replaced by `word`
    pub fn with_word(self, word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..self
        }
    }
}

/// One part-of-speech gloss
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Translation {
    #[serde(rename = "partOfSpeech", default)]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Where a looked-up record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupSource {
    Cache,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// A record to display, with navigation button state
    ShowRecord {
        record: WordRecord,
        source: Option<LookupSource>,
        can_previous: bool,
        can_next: bool,
    },
    /// Transient user-visible message
    Notice(String),
    Lookup(String),
    Navigate(Direction),
    PlayAudio(String),
    BackendReady,
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    ShowSettings,
    SetApiKey(String),
    SetSystemPrompt(String),
    SetPromptTemplate(String),
}
