//! ngxforge Builder
//!
//! Pluggable builder for nginx-style configuration trees. Plugins export
//! named operations; the builder validates them at registration time and
//! dispatches calls against a single shared cursor.

mod args;
mod builder;
mod builtin;
mod capability;
mod context;
mod cursor;
mod registry;
mod scope;
mod traits;

pub use args::{Args, Reply};
pub use builder::ConfigBuilder;
pub use builtin::{RoutePlugin, ServerPlugin, default_plugins};
pub use capability::{RouteMaker, ScopeOpener};
pub use context::{BuildContext, NATIVE_OPERATIONS, Roots};
pub use cursor::{ANONYMOUS_SCOPE, Cursor};
pub use registry::{PluginRegistry, RESERVED_PLUGIN_NAMES, RegisteredPlugin};
pub use scope::Scope;
pub use traits::{
    BuilderId, Operation, OperationTable, Plugin, PluginBinding, PluginInfo, operation,
};
