//! Plugin traits

use crate::args::{Args, Reply};
use crate::context::BuildContext;
use indexmap::IndexMap;
use ngxforge_core::Result;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// An exported operation. Closures are bound to the plugin instance that
/// exported them.
pub type Operation = Arc<dyn Fn(&mut BuildContext<'_>, &Args) -> Result<Reply> + Send + Sync>;

/// Exported operation name -> callable
pub type OperationTable = IndexMap<String, Operation>;

/// Wrap a closure as an [`Operation`].
pub fn operation<F>(f: F) -> Operation
where
    F: Fn(&mut BuildContext<'_>, &Args) -> Result<Reply> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Plugin information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    /// Plugin name
    pub name: String,
    /// Exported operation names
    pub operations: Vec<String>,
    /// Scopes the plugin may attach under
    pub valid_parents: Vec<String>,
}

/// Identity of a config builder instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuilderId(u64);

impl BuilderId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        BuilderId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BuilderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "builder-{}", self.0)
    }
}

/// Records which builder a plugin instance belongs to. Set once.
#[derive(Debug, Default)]
pub struct PluginBinding {
    owner: OnceLock<BuilderId>,
}

impl PluginBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<BuilderId> {
        self.owner.get().copied()
    }

    pub fn is_bound(&self) -> bool {
        self.owner.get().is_some()
    }

    /// Bind to `builder`. Returns false if already bound.
    pub(crate) fn bind(&self, builder: BuilderId) -> bool {
        self.owner.set(builder).is_ok()
    }
}

/// Main plugin trait
///
/// A plugin contributes named operations to a builder. Operation names must
/// be unique across every plugin registered with the same builder.
pub trait Plugin: Send + Sync {
    /// Unique plugin name
    fn name(&self) -> &str;

    /// Header keywords of the scopes this plugin may attach under. Empty
    /// means anywhere.
    fn valid_parents(&self) -> &[&str] {
        &[]
    }

    /// Exported operations, bound to this instance
    fn exported_operations(self: Arc<Self>) -> OperationTable;

    /// Ownership record used to keep the plugin on a single builder
    fn binding(&self) -> &PluginBinding;
}
