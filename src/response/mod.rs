//! Response Handling
//!
//! Wire types for the checker's JSON output and the parser that turns them into
//! a `ValidationResult`.

pub mod message;
pub mod parser;

pub use message::{DiagnosticMessage, MessageKind, ServiceResponse, SourceBlock};
pub use parser::{parse_response, Diagnostic, ParseError, ValidationResult};
