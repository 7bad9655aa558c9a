//! The config builder
//!
//! A [`ConfigBuilder`] owns a config tree with three always-present root
//! sections (anonymous globals, `events`, `http`), a cursor starting at
//! `http`, and a registry of plugins whose operations it dispatches.
//!
//! ```
//! use ngxforge_builder::{Args, ConfigBuilder};
//!
//! let mut nginx = ConfigBuilder::with_defaults()?;
//! {
//!     let mut server = nginx.enter("add_server", ())?;
//!     server.enter("add_route", "/foo")?.end();
//!     let mut bar = server.enter("add_route", "/bar")?;
//!     bar.call("add_route", Args::new().arg("/baz"))?;
//! }
//! let text = nginx.render();
//! assert!(text.contains("\n        location /bar {\n            location /baz {"));
//! # Ok::<(), ngxforge_core::Error>(())
//! ```

use crate::args::{Args, Reply};
use crate::builtin::default_plugins;
use crate::context::{BuildState, NATIVE_OPERATIONS, Roots, dispatch};
use crate::cursor::Cursor;
use crate::registry::PluginRegistry;
use crate::scope::Scope;
use crate::traits::{BuilderId, Plugin, PluginInfo};
use ngxforge_core::config::BuilderSettings;
use ngxforge_core::{Block, ConfigTree, EmptyBlock, Error, NodeId, Result, Value};
use std::fmt;
use std::sync::Arc;

/// Helper that builds a working nginx configuration through plugins
pub struct ConfigBuilder {
    id: BuilderId,
    settings: BuilderSettings,
    state: BuildState,
    registry: PluginRegistry,
}

impl ConfigBuilder {
    /// Builder with default settings and the default plugins
    pub fn with_defaults() -> Result<Self> {
        Self::new(BuilderSettings::default())
    }

    pub fn new(settings: BuilderSettings) -> Result<Self> {
        let mut tree = ConfigTree::new();
        let root = tree.root();

        let globals = tree.attach(
            root,
            EmptyBlock::new()
                .option("worker_processes", settings.worker_processes)
                .option("error_log", settings.error_log.as_str())
                .option("daemon", settings.daemon),
        )?;
        let events = tree.attach(
            root,
            Block::new("events").option("worker_connections", settings.worker_connections),
        )?;
        let http = tree.attach(root, Block::new("http").option("include", "../conf/mime.types"))?;

        let mut builder = Self {
            id: BuilderId::next(),
            settings,
            state: BuildState {
                tree,
                cursor: Cursor::new(http),
                roots: Roots {
                    globals,
                    events,
                    http,
                },
            },
            registry: PluginRegistry::new(),
        };

        for plugin in default_plugins() {
            builder.register_plugin(plugin)?;
        }
        tracing::debug!(builder = %builder.id, "config builder ready");
        Ok(builder)
    }

    pub fn id(&self) -> BuilderId {
        self.id
    }

    pub fn settings(&self) -> &BuilderSettings {
        &self.settings
    }

    /// Register a plugin. Its operations become callable through
    /// [`ConfigBuilder::call`].
    pub fn register_plugin(&mut self, plugin: Arc<dyn Plugin>) -> Result<&mut Self> {
        let name = plugin.name().to_string();
        self.registry
            .register(plugin, self.id, NATIVE_OPERATIONS)
            .inspect_err(|e| tracing::warn!(plugin = %name, "rejected plugin: {e}"))?;
        Ok(self)
    }

    /// Single entry point for operations: native operations first, then
    /// plugin exports.
    pub fn call(&mut self, op: &str, args: impl Into<Args>) -> Result<Reply> {
        dispatch(&self.registry, &mut self.state, op, &args.into())
    }

    /// Run a scope-opening operation and return a guard bound to the new
    /// scope. The cursor goes back to where it was when the guard ends or
    /// is dropped.
    pub fn enter(&mut self, op: &str, args: impl Into<Args>) -> Result<Scope<'_>> {
        let restore_to = self.state.cursor.current();
        match self.call(op, args)? {
            Reply::Scope(node) => Ok(Scope::new(self, node, restore_to)),
            _ => {
                self.state.cursor.restore(restore_to);
                Err(Error::NotAScope(op.to_string()))
            }
        }
    }

    /// Move the cursor to the parent scope.
    pub fn up(&mut self) {
        self.state.cursor.ascend(&self.state.tree);
    }

    /// Close the current scope and keep chaining.
    pub fn end(&mut self) -> &mut Self {
        self.up();
        self
    }

    /// True if `op` is a native operation or exported by a plugin.
    pub fn has_operation(&self, op: &str) -> bool {
        NATIVE_OPERATIONS.contains(&op) || self.registry.contains(op)
    }

    pub fn plugins(&self) -> Vec<PluginInfo> {
        self.registry.list()
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// The logical top of the config hierarchy: the `http` block.
    pub fn top(&self) -> NodeId {
        self.state.roots.http
    }

    pub fn roots(&self) -> Roots {
        self.state.roots
    }

    pub fn globals(&self) -> NodeId {
        self.state.roots.globals
    }

    pub fn events(&self) -> NodeId {
        self.state.roots.events
    }

    pub fn http(&self) -> NodeId {
        self.state.roots.http
    }

    /// Scope the cursor currently points at
    pub fn current(&self) -> Option<NodeId> {
        self.state.cursor.current()
    }

    /// Point the cursor at `node` directly.
    pub fn descend(&mut self, node: NodeId) -> Result<()> {
        self.state.tree.container(node)?;
        self.state.cursor.descend(node);
        Ok(())
    }

    pub(crate) fn restore_cursor(&mut self, to: Option<NodeId>) {
        self.state.cursor.restore(to);
    }

    pub fn tree(&self) -> &ConfigTree {
        &self.state.tree
    }

    pub fn tree_mut(&mut self) -> &mut ConfigTree {
        &mut self.state.tree
    }

    /// Set a single-valued option on a node. Setting an existing key
    /// replaces its value.
    pub fn set_option(
        &mut self,
        node: NodeId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.state.tree.set_option(node, key, value)?;
        Ok(self)
    }

    /// Render the whole configuration.
    pub fn render(&self) -> String {
        self.state.tree.to_string()
    }
}

impl fmt::Display for ConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.state.tree, f)
    }
}

impl fmt::Debug for ConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigBuilder")
            .field("id", &self.id)
            .field("cursor", &self.state.cursor)
            .field("plugins", &self.registry.len())
            .finish()
    }
}
