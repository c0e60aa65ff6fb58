//! Wire types for the checker's JSON output.

use serde::Deserialize;

/// Kind of a reported message, decided once when the response is read
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum MessageKind {
    Error,
    NonDocumentError,
    Other(String),
}

impl From<String> for MessageKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "error" => MessageKind::Error,
            "non-document-error" => MessageKind::NonDocumentError,
            _ => MessageKind::Other(tag),
        }
    }
}

/// One entry of the `messages` array. Coordinates are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub first_line: Option<u32>,
    #[serde(default)]
    pub last_line: u32,
    #[serde(default)]
    pub first_column: u32,
    #[serde(default)]
    pub last_column: u32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub extract: String,
}

impl DiagnosticMessage {
    /// `firstLine` is only sent for multi-line spans
    pub fn resolved_first_line(&self) -> u32 {
        self.first_line.unwrap_or(self.last_line)
    }
}

/// The `source` object echoed back when `showsource=yes`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SourceBlock {
    #[serde(default)]
    pub code: String,
}

/// Whole response body
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceResponse {
    #[serde(default)]
    pub messages: Vec<DiagnosticMessage>,
    #[serde(default)]
    pub source: SourceBlock,
}
