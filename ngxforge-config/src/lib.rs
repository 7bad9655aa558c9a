//! ngxforge Blueprints
//!
//! Declarative documents (TOML or JSON) compiled into a
//! [`ConfigBuilder`](ngxforge_builder::ConfigBuilder).
//!
//! # Example
//!
//! ```
//! use ngxforge_config::{Format, compile_str};
//!
//! let source = r#"
//!     [settings]
//!     worker_connections = 1024
//!
//!     [[servers]]
//!     hostname = "example.com"
//!     options = { listen = 80 }
//!
//!     [[servers.routes]]
//!     path = "/api"
//!     options = { proxy_pass = "http://127.0.0.1:3000" }
//! "#;
//!
//! let builder = compile_str(source, Format::Toml).unwrap();
//! assert!(builder.render().contains("location /api {"));
//! ```

pub mod adapter;
pub mod blueprint;
pub mod compiler;
pub mod error;

pub use adapter::{Format, format_of, parse_blueprint, serialize_blueprint};
pub use blueprint::{Blueprint, Options, RouteBlueprint, ServerBlueprint};
pub use compiler::compile_blueprint;
pub use error::{BlueprintError, Result};

use ngxforge_builder::ConfigBuilder;
use std::path::Path;

/// Full pipeline: source text -> builder
pub fn compile_str(source: &str, format: Format) -> Result<ConfigBuilder> {
    let blueprint = parse_blueprint(format, source)?;
    compile_blueprint(&blueprint)
}

/// Load a blueprint from disk, picking the format by extension.
pub fn load_file(path: impl AsRef<Path>) -> Result<Blueprint> {
    let path = path.as_ref();
    let format = format_of(path)?;
    let source = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), %format, "loading blueprint");
    parse_blueprint(format, &source)
}

/// Load and compile a blueprint file
pub fn compile_file(path: impl AsRef<Path>) -> Result<ConfigBuilder> {
    compile_blueprint(&load_file(path)?)
}
