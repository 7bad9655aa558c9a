//! Settings loader

use crate::config::{BuilderSettings, Format};
use crate::error::{Error, Result};
use std::path::Path;

/// Reads [`BuilderSettings`] from JSON or TOML documents
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a file; the extension picks the format.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<BuilderSettings> {
        let path = path.as_ref();
        let format = Format::from_path(path).ok_or_else(|| {
            Error::Config(format!("{}: expected a .json or .toml settings file", path.display()))
        })?;
        let settings = Self::parse(&std::fs::read_to_string(path)?, format)?;
        tracing::debug!(path = %path.display(), %format, "loaded builder settings");
        Ok(settings)
    }

    pub fn parse(content: &str, format: Format) -> Result<BuilderSettings> {
        format.decode(content)
    }

    pub fn from_json(content: &str) -> Result<BuilderSettings> {
        Self::parse(content, Format::Json)
    }

    pub fn from_toml(content: &str) -> Result<BuilderSettings> {
        Self::parse(content, Format::Toml)
    }
}
