//! Document formats shared by settings files and blueprints

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Serialization format of a settings or blueprint document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Format named by the file extension, case-insensitive.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Deserialize a document, reporting failures as [`Error::Config`].
    pub fn decode<T: DeserializeOwned>(self, source: &str) -> Result<T> {
        match self {
            Format::Json => serde_json::from_str(source).map_err(|e| Error::Config(format!("{self}: {e}"))),
            Format::Toml => toml::from_str(source).map_err(|e| Error::Config(format!("{self}: {e}"))),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            other => Err(Error::Config(format!("unsupported format `{other}`"))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Json => "json",
            Format::Toml => "toml",
        })
    }
}
