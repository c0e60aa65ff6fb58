//! Schema Catalog
//!
//! Maps a schema version to the RELAX NG schema the checker validates against.

use super::source::{CatalogFile, SchemaSource};

const DEFAULT_CSL_SCHEMA: &str =
    "https://raw.githubusercontent.com/citation-style-language/schema/v{version}/csl.rnc";

/// Resolved catalog: pattern sources checked in order, then the default source
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaCatalog {
    default_version: String,
    versions: Vec<String>,
    patterned: Vec<SchemaSource>,
    default_source: SchemaSource,
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::embedded()
    }
}

impl SchemaCatalog {
    /// Build a catalog from a parsed file. Fails if no source has an empty pattern.
    pub fn from_file(file: CatalogFile) -> anyhow::Result<Self> {
        let mut patterned = Vec::new();
        let mut default_source = None;

        for source in file.sources {
            if source.is_default() {
                if default_source.is_none() {
                    default_source = Some(source);
                } else {
                    log::warn!(
                        "Ignoring extra default schema source '{}'",
                        source.name
                    );
                }
            } else {
                patterned.push(source);
            }
        }

        let default_source = default_source
            .ok_or_else(|| anyhow::anyhow!("schema catalog has no source with an empty pattern"))?;

        Ok(Self {
            default_version: file.default_version,
            versions: file.versions,
            patterned,
            default_source,
        })
    }

    /// Catalog embedded in the binary
    pub fn embedded() -> Self {
        let embedded_toml = include_str!("../../resources/schemas.toml");

        match toml::from_str::<CatalogFile>(embedded_toml)
            .map_err(anyhow::Error::from)
            .and_then(Self::from_file)
        {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!(
                    "Failed to parse embedded schema catalog: {}. Using minimal fallback.",
                    e
                );
                Self::minimal()
            }
        }
    }

    /// Single-source fallback pointing at the official CSL schema
    fn minimal() -> Self {
        Self {
            default_version: "1.0.2".to_string(),
            versions: vec!["1.0.2".to_string()],
            patterned: Vec::new(),
            default_source: SchemaSource {
                name: "csl".to_string(),
                pattern: String::new(),
                url: DEFAULT_CSL_SCHEMA.to_string(),
            },
        }
    }

    /// Pick the source for a version: first pattern contained in it, else the default
    pub fn source_for(&self, version: &str) -> &SchemaSource {
        self.patterned
            .iter()
            .find(|source| source.matches(version))
            .unwrap_or(&self.default_source)
    }

    /// Schema URL for a version
    pub fn resolve(&self, version: &str) -> String {
        self.source_for(version).url_for(version)
    }

    pub fn default_version(&self) -> &str {
        &self.default_version
    }

    /// Versions offered for selection
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    pub fn is_known_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }
}
