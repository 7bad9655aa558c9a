//! Plugins every builder starts with

use crate::args::{Args, Reply};
use crate::capability::{RouteMaker, ScopeOpener, value_or};
use crate::context::BuildContext;
use crate::traits::{OperationTable, Plugin, PluginBinding, operation};
use ngxforge_core::{Block, Result};
use std::sync::Arc;

/// Creates `server` blocks. Must be called off of the `http` block.
#[derive(Debug, Default)]
pub struct ServerPlugin {
    binding: PluginBinding,
    opener: ScopeOpener,
}

impl ServerPlugin {
    const HOSTNAME_KEYS: &'static [&'static str] = &["hostname", "name"];

    pub fn new() -> Self {
        Self::default()
    }

    /// `add_server(hostname = "_", **options)`. The hostname may also be
    /// passed as a `hostname` or `name` option; those keys are reserved and
    /// never render as directives, and giving more than one is an error.
    pub fn add_server(&self, ctx: &mut BuildContext<'_>, args: &Args) -> Result<Reply> {
        let hostname = value_or("add_server", args, 0, Self::HOSTNAME_KEYS, "_")?;
        let mut server = Block::new("server").option("server_name", hostname);
        for (key, value) in args.options_except(Self::HOSTNAME_KEYS) {
            server.set_option(key, value.clone());
        }
        self.opener.open(ctx, server)
    }
}

impl Plugin for ServerPlugin {
    fn name(&self) -> &str {
        "server"
    }

    fn valid_parents(&self) -> &[&str] {
        &["http"]
    }

    fn exported_operations(self: Arc<Self>) -> OperationTable {
        let mut table = OperationTable::new();
        table.insert(
            "add_server".to_string(),
            operation(move |ctx, args| self.add_server(ctx, args)),
        );
        table
    }

    fn binding(&self) -> &PluginBinding {
        &self.binding
    }
}

/// Creates routes. Routes can be nested; call off of a `server` or
/// `location` block.
#[derive(Debug, Default)]
pub struct RoutePlugin {
    binding: PluginBinding,
    routes: RouteMaker,
}

impl RoutePlugin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for RoutePlugin {
    fn name(&self) -> &str {
        "route"
    }

    fn valid_parents(&self) -> &[&str] {
        &["location", "server"]
    }

    fn exported_operations(self: Arc<Self>) -> OperationTable {
        let mut table = OperationTable::new();
        table.insert(
            "add_route".to_string(),
            operation(move |ctx, args| self.routes.add_route(ctx, args)),
        );
        table
    }

    fn binding(&self) -> &PluginBinding {
        &self.binding
    }
}

/// Fresh instances of the default plugins
pub fn default_plugins() -> Vec<Arc<dyn Plugin>> {
    vec![Arc::new(RoutePlugin::new()), Arc::new(ServerPlugin::new())]
}
