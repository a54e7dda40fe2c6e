//! Reading declarative documents (JSON or TOML)

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 2] = [DocumentFormat::Json, DocumentFormat::Toml];

    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Toml => "toml",
        }
    }

    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(DocumentFormat::Json),
            "toml" => Some(DocumentFormat::Toml),
            _ => None,
        }
    }

    pub fn parse(self, contents: &str) -> Result<Value> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(contents)?),
            DocumentFormat::Toml => toml::from_str::<Value>(contents)
                .map_err(|e| Error::ConfigError(format!("Failed to parse TOML: {e}"))),
        }
    }
}

/// Read and parse a document; the format follows the file extension
pub fn read_document(path: &Path) -> Result<Value> {
    let format = DocumentFormat::from_path(path).ok_or_else(|| {
        Error::ConfigError(format!("Unsupported document format: {}", path.display()))
    })?;
    let contents = std::fs::read_to_string(path)?;
    format.parse(&contents)
}
