//! Save Action
//!
//! Packages the editor buffer as a downloadable CSL file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
pub const DEFAULT_FILE_NAME: &str = "style.csl";
const DATA_URI_PREFIX: &str = "data:application/octet-stream;charset=utf-8;base64,";

/// Trailing path segment of the style id, e.g. `.../styles/apa` -> `apa`
const ID_PATTERN: &str = r".*<id>.*/(.*)</id>";

/// A file ready to be written or offered for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveArtifact {
    pub file_name: String,
    pub contents: String,
}

impl SaveArtifact {
    pub fn from_buffer(text: &str) -> Self {
        Self {
            file_name: derive_file_name(text),
            contents: format!("{}{}", XML_DECLARATION, text),
        }
    }

    pub fn base64(&self) -> String {
        STANDARD.encode(self.contents.as_bytes())
    }

    pub fn data_uri(&self) -> String {
        format!("{}{}", DATA_URI_PREFIX, self.base64())
    }

    /// Write into `dir`, returning the full path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Saved {}", path.display());
        Ok(path)
    }
}

/// File name from the style's `<id>`, or the default name
pub fn derive_file_name(text: &str) -> String {
    id_segment(text)
        .map(|segment| format!("{}.csl", segment))
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}

fn id_segment(text: &str) -> Option<String> {
    let re = Regex::new(ID_PATTERN).ok()?;
    let captures = re.captures(text)?;
    Some(captures.get(1)?.as_str().to_string())
}
