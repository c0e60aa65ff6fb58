//! Response Parser
//!
//! Folds the checker's message list into a `ValidationResult`.

use serde::Serialize;
use thiserror::Error;

use super::message::{DiagnosticMessage, MessageKind, ServiceResponse};

/// The response body was not the JSON we expect
#[derive(Debug, Error)]
#[error("malformed validator response: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// An error-kind message with its position in the error list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// 1-based running number among error messages
    pub index: usize,
    pub first_line: u32,
    pub last_line: u32,
    pub first_column: u32,
    pub last_column: u32,
    pub message: String,
    pub extract: String,
}

impl Diagnostic {
    fn from_message(index: usize, message: DiagnosticMessage) -> Self {
        Self {
            index,
            first_line: message.resolved_first_line(),
            last_line: message.last_line,
            first_column: message.first_column,
            last_column: message.last_column,
            message: message.message,
            extract: message.extract,
        }
    }

    pub fn is_multiline(&self) -> bool {
        self.first_line != self.last_line
    }
}

/// Everything the renderer needs from one response
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub non_document_error: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub normalized_source: String,
}

impl ValidationResult {
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn has_source(&self) -> bool {
        !self.normalized_source.is_empty()
    }

    /// Look up a diagnostic by its 1-based index
    pub fn diagnostic(&self, index: usize) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.index == index)
    }
}

impl From<ServiceResponse> for ValidationResult {
    fn from(response: ServiceResponse) -> Self {
        let mut result = ValidationResult {
            normalized_source: response.source.code,
            ..Default::default()
        };

        for message in response.messages {
            match message.kind {
                // Last one wins
                MessageKind::NonDocumentError => {
                    result.non_document_error = Some(message.message);
                }
                MessageKind::Error => {
                    let index = result.diagnostics.len() + 1;
                    result
                        .diagnostics
                        .push(Diagnostic::from_message(index, message));
                }
                MessageKind::Other(_) => {}
            }
        }

        result
    }
}

/// Parse a raw response body
pub fn parse_response(body: &str) -> Result<ValidationResult, ParseError> {
    let response: ServiceResponse = serde_json::from_str(body)?;
    Ok(ValidationResult::from(response))
}
