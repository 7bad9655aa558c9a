//! State shared by every operation and the dispatch entry point

use crate::args::{Args, Reply};
use crate::cursor::Cursor;
use crate::registry::{PluginRegistry, RegisteredPlugin};
use ngxforge_core::{ConfigTree, Error, NodeId, Result, Section};

/// Names of every public `ConfigBuilder` method. Plugins may not export
/// these, so `builder.x(..)` and `builder.call("x", ..)` never disagree.
pub const NATIVE_OPERATIONS: &[&str] = &[
    "new",
    "with_defaults",
    "id",
    "settings",
    "register_plugin",
    "call",
    "enter",
    "up",
    "end",
    "has_operation",
    "plugins",
    "registry",
    "top",
    "roots",
    "globals",
    "events",
    "http",
    "current",
    "descend",
    "tree",
    "tree_mut",
    "set_option",
    "render",
];

/// The always-present sections of a builder tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roots {
    /// Anonymous section for global directives
    pub globals: NodeId,
    pub events: NodeId,
    pub http: NodeId,
}

/// Tree plus cursor: everything an operation may change
#[derive(Debug, Clone)]
pub(crate) struct BuildState {
    pub(crate) tree: ConfigTree,
    pub(crate) cursor: Cursor,
    pub(crate) roots: Roots,
}

/// Handle given to a plugin operation while it runs.
///
/// Gives access to the shared cursor and tree. Structural checks use the
/// valid parents of the plugin that owns the running operation.
pub struct BuildContext<'a> {
    state: &'a mut BuildState,
    registry: &'a PluginRegistry,
    plugin: &'a RegisteredPlugin,
}

impl<'a> BuildContext<'a> {
    /// Name of the plugin whose operation is running
    pub fn plugin_name(&self) -> &str {
        self.plugin.name()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.state.cursor.current()
    }

    pub fn descend(&mut self, node: NodeId) {
        self.state.cursor.descend(node);
    }

    pub fn ascend(&mut self) {
        self.state.cursor.ascend(&self.state.tree);
    }

    /// Attach `child` under the current scope after checking it against the
    /// plugin's valid parents.
    pub fn attach(&mut self, child: impl Into<Section>) -> Result<NodeId> {
        self.state.cursor.attach(
            &mut self.state.tree,
            child,
            self.plugin.name(),
            self.plugin.valid_parents(),
        )
    }

    /// The logical top of the hierarchy: the `http` block.
    pub fn top(&self) -> NodeId {
        self.state.roots.http
    }

    pub fn roots(&self) -> Roots {
        self.state.roots
    }

    pub fn tree(&self) -> &ConfigTree {
        &self.state.tree
    }

    pub fn tree_mut(&mut self) -> &mut ConfigTree {
        &mut self.state.tree
    }

    /// Invoke another operation on the same cursor and tree.
    pub fn call(&mut self, op: &str, args: &Args) -> Result<Reply> {
        dispatch(self.registry, &mut *self.state, op, args)
    }
}

/// Native operations first, then the plugin table.
pub(crate) fn dispatch(
    registry: &PluginRegistry,
    state: &mut BuildState,
    op: &str,
    args: &Args,
) -> Result<Reply> {
    match op {
        "end" | "up" => {
            state.cursor.ascend(&state.tree);
            Ok(Reply::Unit)
        }
        "render" => Ok(Reply::Text(state.tree.to_string())),
        "top" | "http" => Ok(Reply::Node(state.roots.http)),
        "globals" => Ok(Reply::Node(state.roots.globals)),
        "events" => Ok(Reply::Node(state.roots.events)),
        "current" => Ok(state.cursor.current().map_or(Reply::Unit, Reply::Node)),
        native if NATIVE_OPERATIONS.contains(&native) => Err(Error::InvalidArguments {
            operation: native.to_string(),
            reason: "native operation; call it directly on the builder".to_string(),
        }),
        _ => {
            let Some((plugin, operation)) = registry.lookup(op) else {
                return Err(Error::NoSuchOperation {
                    operation: op.to_string(),
                    available: registry.operation_names(),
                });
            };
            tracing::debug!(plugin = plugin.name(), operation = op, "dispatch");
            let mut ctx = BuildContext {
                state,
                registry,
                plugin,
            };
            operation(&mut ctx, args)
        }
    }
}
