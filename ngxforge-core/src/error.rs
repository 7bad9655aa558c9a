//! Error types for ngxforge

use thiserror::Error;

/// Result type for ngxforge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ngxforge
#[derive(Error, Debug)]
pub enum Error {
    /// The cursor's scope is not an allowed parent for the operation
    #[error("{plugin}: `{parent}` is not a valid parent for this plugin. Call this off of one of these: {}", .valid_parents.join(", "))]
    InvalidParent {
        plugin: String,
        parent: String,
        valid_parents: Vec<String>,
    },

    /// Two plugins (or a plugin and the builder) export the same name
    #[error("Method `{operation}` from `{plugin}` conflicts with a method of the same name loaded from `{loaded_plugin}`")]
    Conflict {
        plugin: String,
        loaded_plugin: String,
        operation: String,
    },

    /// Plugin uses a reserved name
    #[error("{0} is a protected name and cannot be used as the name of a plugin")]
    ReservedPluginName(String),

    /// Plugin does not satisfy the plugin contract
    #[error("{plugin}: invalid plugin: {reason}")]
    InvalidPlugin { plugin: String, reason: String },

    /// Plugin instance is already bound to another builder
    #[error("{0}: already owned by another config builder")]
    AlreadyOwned(String),

    /// No registered plugin provides the operation
    #[error("No plugins provide method {operation}\nExported methods:\n\t{}", .available.join("\n\t"))]
    NoSuchOperation {
        operation: String,
        available: Vec<String>,
    },

    /// Operation called with unusable arguments
    #[error("{operation}: {reason}")]
    InvalidArguments { operation: String, reason: String },

    /// Operation did not open a new scope
    #[error("{0} does not open a scope")]
    NotAScope(String),

    /// Node id does not belong to the tree
    #[error("Unknown node: {0}")]
    UnknownNode(usize),

    /// Node is a directive and cannot hold children
    #[error("Node {0} is a directive, not a container")]
    NotAContainer(usize),

    /// Attaching would make a container its own descendant
    #[error("Node {node} cannot be placed under itself or its descendant {parent}")]
    Cycle { node: usize, parent: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
