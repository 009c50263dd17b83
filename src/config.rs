//! Scan configuration loading
//!
//! The configuration is a small JSON object naming the directory to scan and
//! the file suffixes to match:
//!
//! ```json
//! { "Directory": "src", "FileTypes": [".ts", ".tsx"] }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Configuration file looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Source named in errors for configurations built in code.
const INLINE_SOURCE: &str = "scan configuration";

/// Failure to obtain a usable scan configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("{file} not found")]
    NotFound { file: String },

    /// The content is not valid JSON.
    #[error("{file} has invalid json")]
    Malformed {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// `Directory` is empty or `FileTypes` has no entries.
    #[error("{file} not configured")]
    NotConfigured { file: String },

    /// Any other fault: missing fields, wrong types, unreadable file.
    #[error("{detail}")]
    Unknown { detail: String },
}

impl ConfigError {
    /// Console diagnostic for this failure, as printed by [`load_or_report`].
    pub fn diagnostic(&self) -> String {
        match self {
            ConfigError::Unknown { detail } => format!("\nException Caught: {}\n", detail),
            other => format!("\nError: {}\n", other),
        }
    }
}

/// On-disk shape of the configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "Directory")]
    directory: String,
    #[serde(rename = "FileTypes")]
    file_types: Vec<String>,
}

/// Directory to scan and the file name suffixes to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub directory: PathBuf,
    pub extensions: Vec<String>,
}

impl ScanConfig {
    /// Build a configuration, rejecting an empty directory or suffix list.
    pub fn new(
        directory: impl Into<PathBuf>,
        extensions: Vec<String>,
    ) -> Result<Self, ConfigError> {
        Self::validated(directory.into(), extensions, INLINE_SOURCE)
    }

    fn validated(
        directory: PathBuf,
        extensions: Vec<String>,
        file: &str,
    ) -> Result<Self, ConfigError> {
        if directory.as_os_str().is_empty() || extensions.is_empty() {
            return Err(ConfigError::NotConfigured {
                file: file.to_string(),
            });
        }
        Ok(Self {
            directory,
            extensions,
        })
    }

    /// Load and validate the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = display_name(path);

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound { file: file.clone() },
            _ => ConfigError::Unknown {
                detail: e.to_string(),
            },
        })?;

        let config = Self::parse(&content, &file)?;
        tracing::info!(
            directory = %config.directory.display(),
            extensions = ?config.extensions,
            "loaded {}",
            file
        );
        Ok(config)
    }

    /// Parse configuration text. `file` only names the source in errors.
    pub fn parse(content: &str, file: &str) -> Result<Self, ConfigError> {
        // Syntax errors and schema errors are reported differently, so parse
        // to a Value first.
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|source| ConfigError::Malformed {
                file: file.to_string(),
                source,
            })?;

        // serde would also accept a positional array for a struct.
        if !value.is_object() {
            return Err(ConfigError::Unknown {
                detail: format!("{} must contain a JSON object", file),
            });
        }

        let raw: RawConfig = serde_json::from_value(value).map_err(|e| ConfigError::Unknown {
            detail: e.to_string(),
        })?;

        Self::validated(PathBuf::from(raw.directory), raw.file_types, file)
    }
}

/// Load the configuration at `path`, printing a diagnostic to stdout on
/// failure instead of returning the error.
pub fn load_or_report(path: &Path) -> Option<ScanConfig> {
    match ScanConfig::load(path) {
        Ok(config) => Some(config),
        Err(e) => {
            println!("{}", e.diagnostic());
            None
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
