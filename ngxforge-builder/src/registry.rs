//! Plugin registry

use crate::traits::{BuilderId, Operation, OperationTable, Plugin, PluginInfo};
use indexmap::IndexMap;
use ngxforge_core::{Error, Result};
use std::sync::Arc;

/// Plugin names that cannot be registered
pub const RESERVED_PLUGIN_NAMES: &[&str] = &["top"];

/// A plugin accepted by a registry, with the facts captured at
/// registration time
pub struct RegisteredPlugin {
    plugin: Arc<dyn Plugin>,
    name: String,
    operations: Vec<String>,
    valid_parents: Vec<String>,
}

impl RegisteredPlugin {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    pub fn valid_parents(&self) -> &[String] {
        &self.valid_parents
    }

    pub fn plugin(&self) -> &Arc<dyn Plugin> {
        &self.plugin
    }

    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: self.name.clone(),
            operations: self.operations.clone(),
            valid_parents: self.valid_parents.clone(),
        }
    }
}

/// Plugin registry: validated plugins and their merged operation table
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<RegisteredPlugin>,
    methods: IndexMap<String, (usize, Operation)>,
}

impl PluginRegistry {
    /// Create a new plugin registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a plugin for the builder `owner`.
    ///
    /// `native` lists operation names the host already provides. Either
    /// every check passes and the plugin is recorded, or nothing changes.
    pub fn register(
        &mut self,
        plugin: Arc<dyn Plugin>,
        owner: BuilderId,
        native: &[&str],
    ) -> Result<()> {
        let name = plugin.name().to_string();
        let table = Arc::clone(&plugin).exported_operations();

        Self::check_conformance(&name, &table)?;

        if RESERVED_PLUGIN_NAMES.contains(&name.as_str()) {
            return Err(Error::ReservedPluginName(name));
        }

        if self.plugins.iter().any(|loaded| loaded.name == name) {
            return Err(Error::Conflict {
                plugin: name.clone(),
                loaded_plugin: name,
                operation: "name".to_string(),
            });
        }

        for op in table.keys() {
            if let Some(loaded) = self.plugins.iter().find(|p| p.operations.contains(op)) {
                return Err(Error::Conflict {
                    plugin: name,
                    loaded_plugin: loaded.name.clone(),
                    operation: op.clone(),
                });
            }
            if native.contains(&op.as_str()) {
                return Err(Error::Conflict {
                    plugin: name,
                    loaded_plugin: "top".to_string(),
                    operation: op.clone(),
                });
            }
        }

        if !plugin.binding().bind(owner) {
            return Err(Error::AlreadyOwned(name));
        }

        let index = self.plugins.len();
        let valid_parents = plugin.valid_parents().iter().map(|p| p.to_string()).collect();
        let operations: Vec<String> = table.keys().cloned().collect();
        self.methods
            .extend(table.into_iter().map(|(op, f)| (op, (index, f))));

        tracing::info!(
            "Registering plugin: {} ({})",
            name,
            operations.join(", ")
        );

        self.plugins.push(RegisteredPlugin {
            plugin,
            name,
            operations,
            valid_parents,
        });
        Ok(())
    }

    fn check_conformance(name: &str, table: &OperationTable) -> Result<()> {
        let invalid = |reason: String| Error::InvalidPlugin {
            plugin: name.to_string(),
            reason,
        };
        if name.trim().is_empty() {
            return Err(invalid("plugin name must not be empty".to_string()));
        }
        for op in table.keys() {
            let well_formed = !op.is_empty()
                && !op.starts_with(|c: char| c.is_ascii_digit())
                && op.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !well_formed {
                return Err(invalid(format!("`{op}` is not a valid operation name")));
            }
        }
        Ok(())
    }

    /// Plugin and callable exporting `op`
    pub fn lookup(&self, op: &str) -> Option<(&RegisteredPlugin, &Operation)> {
        self.methods
            .get(op)
            .map(|(index, operation)| (&self.plugins[*index], operation))
    }

    pub fn contains(&self, op: &str) -> bool {
        self.methods.contains_key(op)
    }

    /// Get a plugin by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins
            .iter()
            .find(|p| p.name == name)
            .map(|p| Arc::clone(&p.plugin))
    }

    /// List all registered plugins
    pub fn list(&self) -> Vec<PluginInfo> {
        self.plugins.iter().map(RegisteredPlugin::info).collect()
    }

    /// All exported operation names, in registration order
    pub fn operation_names(&self) -> Vec<String> {
        self.methods.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
