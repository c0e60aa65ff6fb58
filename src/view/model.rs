//! View Model
//!
//! Describes what the page shows. Everything under `Inserted` belongs to one
//! validation result and is dropped as a whole before the next one is applied.

use std::time::Duration;

use serde::Serialize;

use crate::highlight::{line_label, CurrentError};
use crate::response::{Diagnostic, ValidationResult};

pub const SUCCESS_MESSAGE: &str = "Good job! No errors found.";
pub const CONTRIBUTING_URL: &str =
    "https://github.com/citation-style-language/styles/blob/master/CONTRIBUTING.md";
pub const CSL_SPECIFICATION_URL: &str = "http://citationstyles.org/downloads/specification.html";
pub const JURIS_M_SUPPLEMENT_URL: &str = "http://citationstylist.org/docs/citeproc-js-csl.html";
pub const ERRORS_TOOLTIP: &str = "Click the link next to an error description to highlight the relevant lines in the Source window below";

/// Where the session is in its request/response cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Validating,
    Success,
    NonDocumentFailure(String),
    Errors(usize),
    TimedOut,
    TransportFailure(String),
}

impl SessionState {
    /// State a parsed response leads to
    pub fn for_result(result: &ValidationResult) -> Self {
        if let Some(reason) = &result.non_document_error {
            SessionState::NonDocumentFailure(reason.clone())
        } else if result.diagnostics.is_empty() {
            SessionState::Success
        } else {
            SessionState::Errors(result.diagnostics.len())
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SessionState::NonDocumentFailure(_)
                | SessionState::Errors(_)
                | SessionState::TimedOut
                | SessionState::TransportFailure(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerLevel {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Small print under a banner message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub text: String,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
    pub footer: Option<Footer>,
}

/// One clickable entry of the errors list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEntry {
    pub index: usize,
    pub label: String,
    pub message: String,
    pub extract: String,
    /// (first_line, first_column, last_line, last_column), 1-based
    pub span: (u32, u32, u32, u32),
}

impl From<&Diagnostic> for DiagnosticEntry {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            index: diagnostic.index,
            label: line_label(diagnostic),
            message: diagnostic.message.clone(),
            extract: diagnostic.extract.clone(),
            span: (
                diagnostic.first_line,
                diagnostic.first_column,
                diagnostic.last_line,
                diagnostic.last_column,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorsPanel {
    pub level: BannerLevel,
    pub heading: String,
    pub tooltip: String,
    pub entries: Vec<DiagnosticEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePanel {
    pub heading: String,
    pub line_count: usize,
}

/// Result markup of the current cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inserted {
    pub banners: Vec<Banner>,
    pub errors_panel: Option<ErrorsPanel>,
    pub source_panel: Option<SourcePanel>,
    pub current_error: Option<CurrentError>,
}

impl Inserted {
    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
            && self.errors_panel.is_none()
            && self.source_panel.is_none()
            && self.current_error.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Source,
    Errors,
}

/// Full page description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub state: SessionState,
    pub active_tab: Tab,
    pub errors_tab_enabled: bool,
    pub busy: bool,
    pub save_enabled: bool,
    pub inserted: Inserted,
}

impl Default for View {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            active_tab: Tab::Source,
            errors_tab_enabled: true,
            busy: false,
            save_enabled: false,
            inserted: Inserted::default(),
        }
    }
}

/// Markup for a parsed response
pub fn render_result(result: &ValidationResult) -> Inserted {
    let mut inserted = Inserted::default();

    match SessionState::for_result(result) {
        SessionState::NonDocumentFailure(reason) => {
            inserted.banners.push(Banner {
                level: BannerLevel::Warning,
                message: format!("Validation failed: {}", reason),
                footer: None,
            });
        }
        SessionState::Errors(count) => {
            inserted.banners.push(errors_banner(count));
            inserted.errors_panel = Some(ErrorsPanel {
                level: BannerLevel::Warning,
                heading: "Errors".to_string(),
                tooltip: ERRORS_TOOLTIP.to_string(),
                entries: result.diagnostics.iter().map(DiagnosticEntry::from).collect(),
            });
        }
        _ => inserted.banners.push(success_banner()),
    }

    if result.has_source() {
        inserted.source_panel = Some(SourcePanel {
            heading: "Source".to_string(),
            line_count: result.normalized_source.lines().count(),
        });
    }

    inserted
}

fn success_banner() -> Banner {
    Banner {
        level: BannerLevel::Success,
        message: SUCCESS_MESSAGE.to_string(),
        footer: Some(Footer {
            text: "Interested in contributing your style or locale file? See our instructions."
                .to_string(),
            links: vec![Link::new("instructions", CONTRIBUTING_URL)],
        }),
    }
}

/// "Oops, I found 1 error." / "Oops, I found N errors."
pub fn error_count_message(count: usize) -> String {
    if count == 1 {
        "Oops, I found 1 error.".to_string()
    } else {
        format!("Oops, I found {} errors.", count)
    }
}

fn errors_banner(count: usize) -> Banner {
    Banner {
        level: BannerLevel::Danger,
        message: error_count_message(count),
        footer: Some(Footer {
            text: "If you have trouble understanding the error messages below, start by reading the CSL specification and the Juris-M Specification Supplement."
                .to_string(),
            links: vec![
                Link::new("CSL specification", CSL_SPECIFICATION_URL),
                Link::new("Juris-M Specification Supplement", JURIS_M_SUPPLEMENT_URL),
            ],
        }),
    }
}

/// Shown when the response timer fires first
pub fn timeout_banner(timeout: Duration, endpoint: &str) -> Banner {
    Banner {
        level: BannerLevel::Warning,
        message: format!(
            "Validation is taking longer than expected! (more than {} seconds)",
            timeout.as_secs_f64()
        ),
        footer: Some(Footer {
            text: "This typically happens if the Nu HTML Checker website is down, but maybe you get lucky if you wait a little longer."
                .to_string(),
            links: vec![Link::new("Nu HTML Checker", endpoint)],
        }),
    }
}

/// Shown when no usable response came back
pub fn transport_banner(reason: &str) -> Banner {
    Banner {
        level: BannerLevel::Warning,
        message: format!(
            "Validation failed: could not get a response from the validator ({})",
            reason
        ),
        footer: None,
    }
}
