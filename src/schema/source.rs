//! Schema Source Types
//!
//! Catalog file layout (matches TOML) and single schema source entries.

use serde::Deserialize;

/// Root catalog file structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogFile {
    pub default_version: String,
    #[serde(default)]
    pub versions: Vec<String>,
    pub sources: Vec<SchemaSource>,
}

/// One schema location, selected when `pattern` occurs in the version string
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SchemaSource {
    pub name: String,
    #[serde(default)]
    pub pattern: String,
    /// URL template, `{version}` is substituted
    pub url: String,
}

impl SchemaSource {
    /// The source used when no pattern matches
    pub fn is_default(&self) -> bool {
        self.pattern.is_empty()
    }

    pub fn matches(&self, version: &str) -> bool {
        !self.pattern.is_empty() && version.contains(&self.pattern)
    }

    pub fn url_for(&self, version: &str) -> String {
        self.url.replace("{version}", version)
    }
}
