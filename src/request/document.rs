//! Validation input: how the document is supplied and which schema version to use.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// How the document reaches the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMethod {
    Url,
    File,
    Text,
}

impl SourceMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMethod::Url => "url",
            SourceMethod::File => "file",
            SourceMethod::Text => "text",
        }
    }
}

impl fmt::Display for SourceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "url" => Ok(SourceMethod::Url),
            "file" | "file-upload" => Ok(SourceMethod::File),
            "text" | "textarea" => Ok(SourceMethod::Text),
            other => Err(format!(
                "unknown source method '{}' (expected url, file or text)",
                other
            )),
        }
    }
}

/// The document itself, in the shape its source method provides
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentRef {
    Url(String),
    File { name: String, bytes: Vec<u8> },
    Text(String),
}

impl DocumentRef {
    pub fn method(&self) -> SourceMethod {
        match self {
            DocumentRef::Url(_) => SourceMethod::Url,
            DocumentRef::File { .. } => SourceMethod::File,
            DocumentRef::Text(_) => SourceMethod::Text,
        }
    }

    /// A URL reference with nothing but whitespace
    pub fn is_blank_url(&self) -> bool {
        matches!(self, DocumentRef::Url(url) if url.trim().is_empty())
    }
}

/// One validation attempt's input. Built fresh for every attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRequest {
    pub document: DocumentRef,
    pub schema_version: String,
}

impl ValidationRequest {
    pub fn new(document: DocumentRef, schema_version: impl Into<String>) -> Self {
        Self {
            document,
            schema_version: schema_version.into(),
        }
    }

    pub fn method(&self) -> SourceMethod {
        self.document.method()
    }
}
