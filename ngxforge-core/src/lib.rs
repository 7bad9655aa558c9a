//! ngxforge Core Library
//!
//! This crate provides the config tree, its renderer, builder settings and
//! the shared error type for ngxforge.

pub mod config;
pub mod error;
pub mod helpers;
pub mod tree;

pub use error::{Error, Result};
pub use tree::{Block, ConfigTree, Directive, EmptyBlock, NodeId, Section, Value};

/// ngxforge version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
