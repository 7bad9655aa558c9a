//! Blueprint errors

use thiserror::Error;

/// Errors raised while loading or compiling a blueprint
#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Unsupported blueprint format: {0}")]
    UnknownFormat(String),

    #[error("Build error: {0}")]
    Build(#[from] ngxforge_core::Error),
}

pub type Result<T> = std::result::Result<T, BlueprintError>;
