//! Request Construction
//!
//! Validation input types, the request builder and the shareable page link.

pub mod address;
pub mod builder;
pub mod document;

pub use address::{AddressBar, StartupParams};
pub use builder::{DocumentPart, OutboundRequest, RequestBuilder, FIXED_PARAMETERS};
pub use document::{DocumentRef, SourceMethod, ValidationRequest};
