//! The builder's current working scope

use ngxforge_core::{ConfigTree, Error, NodeId, Result, Section};

/// Label used in errors for anonymous containers
pub const ANONYMOUS_SCOPE: &str = "top";

/// Single shared pointer to the scope the next node is attached under.
///
/// `None` is the null state reached by ascending past the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    current: Option<NodeId>,
}

impl Cursor {
    pub fn new(start: NodeId) -> Self {
        Self {
            current: Some(start),
        }
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Move to `node`.
    pub fn descend(&mut self, node: NodeId) {
        tracing::debug!(to = %node, "cursor descend");
        self.current = Some(node);
    }

    /// Move to the parent of the current scope. Ascending from the root, or
    /// from the null state, leaves the cursor null.
    pub fn ascend(&mut self, tree: &ConfigTree) {
        self.current = self.current.and_then(|id| tree.parent(id));
        tracing::debug!(to = ?self.current, "cursor ascend");
    }

    pub(crate) fn restore(&mut self, to: Option<NodeId>) {
        self.current = to;
    }

    /// Attach `child` under the current scope, provided the scope's header
    /// keyword is one of `valid_parents` (an empty list allows any scope).
    /// Nothing is modified when the check fails.
    pub fn attach(
        &self,
        tree: &mut ConfigTree,
        child: impl Into<Section>,
        plugin: &str,
        valid_parents: &[String],
    ) -> Result<NodeId> {
        let Some(current) = self.current else {
            return Err(Error::InvalidParent {
                plugin: plugin.to_string(),
                parent: "(none)".to_string(),
                valid_parents: valid_parents.to_vec(),
            });
        };

        let head = tree.container(current)?.head();
        if !valid_parents.is_empty() && !head.is_some_and(|h| valid_parents.iter().any(|p| p == h)) {
            return Err(Error::InvalidParent {
                plugin: plugin.to_string(),
                parent: head.unwrap_or(ANONYMOUS_SCOPE).to_string(),
                valid_parents: valid_parents.to_vec(),
            });
        }

        tree.attach(current, child)
    }
}
