//! Schema Selection
//!
//! Version-pattern to schema-URL mapping, kept as data rather than branching.

pub mod catalog;
pub mod source;

pub use catalog::SchemaCatalog;
pub use source::{CatalogFile, SchemaSource};
