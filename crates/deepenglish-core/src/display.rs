use std::ops::Range;
use std::sync::LazyLock;

use deepenglish_types::WordRecord;
use regex::Regex;

/// Shown in place of an absent or empty field
pub const PLACEHOLDER: &str = "无";

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word pattern is valid"));

/// A clickable word inside the rendered example sentence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    /// Byte range into `RenderedRecord::text`
    pub range: Range<usize>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRecord {
    pub text: String,
    pub spans: Vec<WordSpan>,
}

fn or_placeholder(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(PLACEHOLDER)
}

pub fn render(record: &WordRecord) -> RenderedRecord {
    let mut text = String::new();

    text.push_str("单词: ");
    text.push_str(or_placeholder(Some(record.word.as_str())));

    text.push_str("\n\n例句: ");
    let sentence_start = text.len();
    let sentence = record.sentence.as_deref().filter(|s| !s.is_empty());
    text.push_str(or_placeholder(sentence));

    text.push_str("\n\n音标: ");
    text.push_str(or_placeholder(record.phonetics.as_deref()));

    text.push_str("\n\n词义:\n");
    if record.translations.is_empty() {
        text.push_str(PLACEHOLDER);
    } else {
        let lines: Vec<String> = record
            .translations
            .iter()
            .map(|t| {
                format!(
                    "  - {} {}",
                    t.part_of_speech.as_deref().unwrap_or_default(),
                    or_placeholder(t.definition.as_deref())
                )
            })
            .collect();
        text.push_str(&lines.join("\n"));
    }

    text.push_str("\n\n例句翻译: ");
    text.push_str(or_placeholder(record.sentence_translation.as_deref()));

    text.push_str("\n\n语法说明: ");
    text.push_str(or_placeholder(record.sentence_grammar.as_deref()));

    let spans = sentence
        .map(|s| {
            WORD_PATTERN
                .find_iter(s)
                .map(|m| WordSpan {
                    range: sentence_start + m.start()..sentence_start + m.end(),
                    text: m.as_str().to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    RenderedRecord { text, spans }
}
