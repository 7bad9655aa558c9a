//! Compiler for blueprints
//!
//! Replays a [`Blueprint`] as builder calls: one `add_server` per server and
//! nested `add_route` calls per route, each inside a scope that closes
//! before the next sibling is added.

use crate::blueprint::{Blueprint, Options, RouteBlueprint, ServerBlueprint};
use crate::error::Result;
use ngxforge_builder::{Args, ConfigBuilder};

/// Compile a blueprint into a ready builder.
pub fn compile_blueprint(blueprint: &Blueprint) -> Result<ConfigBuilder> {
    let mut builder = ConfigBuilder::new(blueprint.settings.clone())?;

    let globals = builder.globals();
    let http = builder.http();
    for (key, value) in &blueprint.globals {
        builder.set_option(globals, key.as_str(), value.clone())?;
    }
    for (key, value) in &blueprint.http {
        builder.set_option(http, key.as_str(), value.clone())?;
    }

    for server in &blueprint.servers {
        compile_server(&mut builder, server)?;
    }

    tracing::debug!(
        servers = blueprint.servers.len(),
        routes = blueprint.route_count(),
        "compiled blueprint"
    );
    Ok(builder)
}

fn compile_server(builder: &mut ConfigBuilder, server: &ServerBlueprint) -> Result<()> {
    let mut args = with_options(Args::new(), &server.options);
    if let Some(hostname) = &server.hostname {
        args = args.arg(hostname.as_str());
    }

    let mut scope = builder.enter("add_server", args)?;
    compile_routes(&mut scope, &server.routes)
}

fn compile_routes(builder: &mut ConfigBuilder, routes: &[RouteBlueprint]) -> Result<()> {
    for route in routes {
        let args = with_options(Args::new().arg(route.path.as_str()), &route.options);
        let mut scope = builder.enter("add_route", args)?;
        compile_routes(&mut scope, &route.routes)?;
    }
    Ok(())
}

fn with_options(args: Args, options: &Options) -> Args {
    options
        .iter()
        .fold(args, |args, (key, value)| args.option(key.as_str(), value.clone()))
}
