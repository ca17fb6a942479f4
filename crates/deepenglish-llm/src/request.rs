use deepenglish_config::Settings;
use deepenglish_types::WordRecord;
use serde::{Deserialize, Serialize};

use crate::LookupError;

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub response_format: ResponseFormat,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

impl ChatRequest {
    /// Non-streaming JSON-mode request for `word`
    pub fn for_word(model: &str, settings: &Settings, word: &str) -> Self {
        Self {
            model: model.to_string(),
            response_format: ResponseFormat::json_object(),
            messages: vec![
                ChatMessage::new("system", &settings.system_prompt),
                ChatMessage::new("user", settings.user_prompt(word)),
            ],
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChatMessage>,
}

impl ChatResponse {
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

/// Decode a chat-completion response body into the record for `word`
pub fn parse_answer(body: &[u8], word: &str) -> Result<WordRecord, LookupError> {
    let response: ChatResponse = serde_json::from_slice(body)
        .map_err(|e| LookupError::MalformedAnswer(format!("response envelope: {e}")))?;

    let content = response
        .first_content()
        .filter(|c| !c.trim().is_empty())
        .ok_or(LookupError::EmptyResponse)?;

    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| LookupError::MalformedAnswer(e.to_string()))?;

    if !value.is_object() {
        return Err(LookupError::MalformedAnswer(
            "answer is not a JSON object".to_string(),
        ));
    }

    let record: WordRecord = serde_json::from_value(value)
        .map_err(|e| LookupError::MalformedAnswer(e.to_string()))?;

    Ok(record.with_word(word))
}
