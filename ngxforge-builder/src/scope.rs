//! Scoped editing sessions

use crate::builder::ConfigBuilder;
use ngxforge_core::NodeId;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Guard for a scope opened with [`ConfigBuilder::enter`].
///
/// Dereferences to the builder, so any operation can be called through it.
/// When the guard is ended or dropped (including while unwinding) the cursor
/// returns to the scope that was current before entry.
pub struct Scope<'a> {
    builder: Option<&'a mut ConfigBuilder>,
    node: NodeId,
    restore_to: Option<NodeId>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(
        builder: &'a mut ConfigBuilder,
        node: NodeId,
        restore_to: Option<NodeId>,
    ) -> Self {
        Self {
            builder: Some(builder),
            node,
            restore_to,
        }
    }

    /// The node this scope was opened on
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Scope the cursor returns to on exit
    pub fn parent(&self) -> Option<NodeId> {
        self.restore_to
    }

    /// Close the scope and hand back the builder for further chaining.
    pub fn end(mut self) -> &'a mut ConfigBuilder {
        let Some(builder) = self.builder.take() else {
            unreachable!("scope released twice");
        };
        builder.restore_cursor(self.restore_to);
        builder
    }
}

impl Deref for Scope<'_> {
    type Target = ConfigBuilder;

    fn deref(&self) -> &ConfigBuilder {
        match self.builder.as_deref() {
            Some(builder) => builder,
            None => unreachable!("scope used after release"),
        }
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut ConfigBuilder {
        match self.builder.as_deref_mut() {
            Some(builder) => builder,
            None => unreachable!("scope used after release"),
        }
    }
}

impl fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("node", &self.node)
            .field("restore_to", &self.restore_to)
            .finish()
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if let Some(builder) = self.builder.take() {
            builder.restore_cursor(self.restore_to);
        }
    }
}
