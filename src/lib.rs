//! CSL Validator
//!
//! Submits CSL styles and locales to a Nu HTML Checker instance and turns the
//! answer into an error list with source highlights.
//!
//! This library provides:
//! - Request construction for URL, file and text documents
//! - Response parsing into ordered diagnostics
//! - A validation session driving timer, highlight marker and view state
//! - Configuration management

pub mod cli;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod indicator;
pub mod request;
pub mod response;
pub mod save;
pub mod schema;
pub mod session;
pub mod transport;
pub mod view;

// Re-exports for the public API
pub use config::Config;
pub use request::{DocumentRef, SourceMethod, ValidationRequest};
pub use response::{parse_response, Diagnostic, ValidationResult};
pub use session::{Trigger, ValidationSession};
pub use view::{SessionState, View};
