//! Final assistant output of a turn.

use serde_json::Value;

use super::extractor::extract_payload;

/// Assembled assistant text plus any structured payload found in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub payload: Option<Value>,
}

impl Transcript {
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let payload = extract_payload(&text);
        Self { text, payload }
    }
}
