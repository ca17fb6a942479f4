use serde::{Deserialize, Serialize};

/// Token replaced by the looked-up word in the prompt template
pub const WORD_PLACEHOLDER: &str = "{word}";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant that provides sentence examples, phonetics, and detailed translations with parts of speech in a JSON format. Use common abbreviations for parts of speech (e.g., n., v., adj.).";

pub const DEFAULT_PROMPT_TEMPLATE: &str = r#"
For the word "{word}", provide the following in a JSON format:
1. A simple English sentence using the word.
2. The Chinese translation of the sentence.
3. A grammatical explanation of the sentence in Chinese.
4. The International Phonetic Alphabet (IPA) transcription.
5. A list of its Chinese translations, including part of speech and definition.

Example JSON format for the word "book":
{
  "sentence": "I need to book a flight to Beijing.",
  "sentence_translation": "我需要预订一张去北京的机票。",
  "sentence_grammar": "在这个句子中, 'book' 用作动词。句子结构是 '主语 + need to + 动词 (book) + 宾语 (a flight)'。",
  "phonetics": "/bʊk/",
  "translations": [
    {
      "partOfSpeech": "n.",
      "definition": "书, 书籍; 卷, 册"
    },
    {
      "partOfSpeech": "v.",
      "definition": "预订, 预约"
    }
  ]
}
"#;

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_prompt_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

/// User-editable lookup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,
}

impl Settings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Prompt sent as the user message for `word`
    pub fn user_prompt(&self, word: &str) -> String {
        self.prompt_template.replace(WORD_PLACEHOLDER, word)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.prompt_template.contains(WORD_PLACEHOLDER) {
            return Err(SettingsError::MissingPlaceholder);
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            system_prompt: default_system_prompt(),
            prompt_template: default_prompt_template(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Prompt template must contain the {{word}} placeholder")]
    MissingPlaceholder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_substitutes_word_once() {
        let settings = Settings {
            prompt_template: "For the word \"{word}\"...".to_string(),
            ..Settings::default()
        };

        let prompt = settings.user_prompt("book");
        assert_eq!(prompt, "For the word \"book\"...");
        assert_eq!(prompt.matches("For the word \"book\"...").count(), 1);
    }

    #[test]
    fn test_default_template_is_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(!settings.has_api_key());
        assert!(settings.user_prompt("run").contains("For the word \"run\""));
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let settings = Settings {
            prompt_template: "Describe a word".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::MissingPlaceholder)
        ));
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        assert!(!Settings::new("   ").has_api_key());
        assert!(Settings::new("sk-123").has_api_key());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"api_key": "sk-1"}"#).unwrap();
        assert_eq!(settings.api_key, "sk-1");
        assert_eq!(settings.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(settings.prompt_template, DEFAULT_PROMPT_TEMPLATE);
    }
}
