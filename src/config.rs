//! Configuration management for the CSL validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - The optional TOML config file (service endpoint, timeout, schema catalog)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use url::Url;

use crate::request::SourceMethod;
use crate::schema::{CatalogFile, SchemaCatalog};

pub const DEFAULT_ENDPOINT: &str = "http://our.law.nagoya-u.ac.jp/validate/";
pub const DEFAULT_PAGE_URL: &str = "https://validator.citationstyles.org/";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Command-line arguments for the CSL validator
#[derive(Debug, Parser)]
#[command(name = "csl-validate")]
#[command(about = "Validate CSL styles and locales against the CSL schema")]
#[command(version)]
pub struct Args {
    /// Document to validate: a URL, a file path or literal text, depending on --method
    pub document: Option<String>,

    #[arg(long, default_value = "url", help = "How the document is supplied (url, file, text)")]
    pub method: SourceMethod,

    /// Read the document text from standard input
    #[arg(long)]
    pub stdin: bool,

    #[arg(long, help = "CSL schema version (e.g. '1.0.1', '1.0.1-mlz1')")]
    pub schema_version: Option<String>,

    /// Page link whose `url` and `version` query parameters start a validation
    #[arg(long)]
    pub link: Option<String>,

    #[arg(long, help = "Nu HTML Checker endpoint")]
    pub endpoint: Option<String>,

    #[arg(long, help = "Milliseconds before the slow-response warning")]
    pub timeout_ms: Option<u64>,

    /// Config file (defaults to <config dir>/csl-validator/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Highlight the diagnostic with this number and print its source lines
    #[arg(long = "select", value_name = "N")]
    pub select: Vec<usize>,

    /// Write the normalized source into this directory
    #[arg(long, value_name = "DIR")]
    pub save: Option<PathBuf>,

    /// Revalidate whenever the file changes (file method only)
    #[arg(long)]
    pub watch: bool,

    /// Print the page description as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// `[service]` table of the config file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ServiceSection {
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
    pub page_url: Option<String>,
}

/// Root config file structure (matches TOML)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub service: ServiceSection,
    pub schemas: Option<CatalogFile>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub timeout: Duration,
    /// Page link the address bar starts from
    pub page_url: Url,
    pub catalog: SchemaCatalog,
    /// Version explicitly chosen on the command line
    pub schema_version: Option<String>,
    pub method: SourceMethod,
    pub document: Option<String>,
    pub read_stdin: bool,
    pub selections: Vec<usize>,
    pub save_dir: Option<PathBuf>,
    pub watch: bool,
    pub json: bool,
    pub log_level: String,
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            page_url: default_page_url(),
            catalog: SchemaCatalog::embedded(),
            schema_version: None,
            method: SourceMethod::Url,
            document: None,
            read_stdin: false,
            selections: Vec::new(),
            save_dir: None,
            watch: false,
            json: false,
            log_level: "info".to_string(),
            config_path: None,
        }
    }
}

fn default_page_url() -> Url {
    Url::parse(DEFAULT_PAGE_URL).expect("Default page url should parse")
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let config_path = args.config.clone().or_else(default_config_path);
        let file = match &config_path {
            Some(path) if path.exists() => {
                log::debug!("Loading config file {}", path.display());
                ConfigFile::load(path)?
            }
            Some(path) if args.config.is_some() => {
                anyhow::bail!("Config file not found: {}", path.display())
            }
            _ => ConfigFile::default(),
        };

        Self::from_parts(args, file, config_path)
    }

    /// Merge arguments over a loaded config file over defaults
    pub fn from_parts(args: Args, file: ConfigFile, config_path: Option<PathBuf>) -> Result<Self> {
        let defaults = Config::default();

        let catalog = match file.schemas {
            Some(schemas) => SchemaCatalog::from_file(schemas).context("Invalid [schemas] table")?,
            None => defaults.catalog,
        };

        let page_url = match args.link.as_deref().or(file.service.page_url.as_deref()) {
            Some(link) => Url::parse(link).with_context(|| format!("Invalid page link: {}", link))?,
            None => defaults.page_url,
        };

        let timeout_ms = args
            .timeout_ms
            .or(file.service.timeout_ms)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        if args.watch && args.method != SourceMethod::File {
            anyhow::bail!("--watch needs --method file");
        }

        Ok(Config {
            endpoint: args
                .endpoint
                .or(file.service.endpoint)
                .unwrap_or(defaults.endpoint),
            timeout: Duration::from_millis(timeout_ms),
            page_url,
            catalog,
            schema_version: args.schema_version,
            method: args.method,
            document: args.document,
            read_stdin: args.stdin,
            selections: args.select,
            save_dir: args.save,
            watch: args.watch,
            json: args.json,
            log_level: args.log_level,
            config_path,
        })
    }

    /// Version used when nothing else selects one
    pub fn effective_schema_version(&self) -> String {
        self.schema_version
            .clone()
            .unwrap_or_else(|| self.catalog.default_version().to_string())
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("csl-validator").join("config.toml"))
}
