//! Plugin registration and custom plugin tests

use ngxforge_builder::{
    Args, BuildContext, ConfigBuilder, OperationTable, Plugin, PluginBinding, Reply, RouteMaker,
    operation,
};
use ngxforge_core::{Block, Error, Result, Value};
use pretty_assertions::assert_eq;
use std::sync::Arc;

/// Plugin exporting the given operation names, each returning Unit.
struct Dummy {
    name: &'static str,
    ops: Vec<&'static str>,
    binding: PluginBinding,
}

impl Dummy {
    fn new(name: &'static str, ops: &[&'static str]) -> Arc<Self> {
        Arc::new(Self {
            name,
            ops: ops.to_vec(),
            binding: PluginBinding::new(),
        })
    }
}

impl Plugin for Dummy {
    fn name(&self) -> &str {
        self.name
    }

    fn exported_operations(self: Arc<Self>) -> OperationTable {
        self.ops
            .iter()
            .map(|op| {
                let owner = self.name;
                (
                    op.to_string(),
                    operation(move |_, _| Ok(Reply::Text(owner.to_string()))),
                )
            })
            .collect()
    }

    fn binding(&self) -> &PluginBinding {
        &self.binding
    }
}

/// Cache-expiry plugin: turns on a shared cache on `http` and adds an
/// `expires` directive to the current route.
#[derive(Default)]
struct ExpiresPlugin {
    binding: PluginBinding,
}

impl ExpiresPlugin {
    fn cache_route(&self, ctx: &mut BuildContext<'_>, args: &Args) -> Result<Reply> {
        let ttl = args
            .lookup(0, &["ttl"])
            .cloned()
            .unwrap_or_else(|| Value::from("1h"));
        let location = ctx.current().ok_or_else(|| Error::InvalidArguments {
            operation: "cache_route".to_string(),
            reason: "no current scope".to_string(),
        })?;
        ctx.attach(ngxforge_core::Directive::key_value("expires", ttl))?;
        let top = ctx.top();
        ctx.tree_mut()
            .set_option(top, "proxy_cache_path", "/tmp/cache keys_zone=default:10m")?;
        Ok(Reply::Node(location))
    }
}

impl Plugin for ExpiresPlugin {
    fn name(&self) -> &str {
        "expires"
    }

    fn valid_parents(&self) -> &[&str] {
        &["location"]
    }

    fn exported_operations(self: Arc<Self>) -> OperationTable {
        let mut table = OperationTable::new();
        table.insert(
            "cache_route".to_string(),
            operation(move |ctx, args| self.cache_route(ctx, args)),
        );
        table
    }

    fn binding(&self) -> &PluginBinding {
        &self.binding
    }
}

/// Static-site plugin composing the route capability with nested calls.
#[derive(Default)]
struct StaticSitePlugin {
    binding: PluginBinding,
    routes: RouteMaker,
}

impl StaticSitePlugin {
    fn add_static(&self, ctx: &mut BuildContext<'_>, args: &Args) -> Result<Reply> {
        let root = args.lookup(0, &["root"]).cloned().unwrap_or(Value::from("html"));
        let path = args.named("path").cloned().unwrap_or(Value::from("/"));
        let server = ctx.call("add_server", &Args::new())?;
        let reply = self
            .routes
            .add_route(ctx, &Args::new().arg(path).option("root", root))?;
        if let Some(node) = server.scope() {
            ctx.tree_mut().set_option(node, "index", "index.html")?;
        }
        Ok(reply)
    }
}

impl Plugin for StaticSitePlugin {
    fn name(&self) -> &str {
        "static_site"
    }

    fn valid_parents(&self) -> &[&str] {
        &["server", "location"]
    }

    fn exported_operations(self: Arc<Self>) -> OperationTable {
        let mut table = OperationTable::new();
        table.insert(
            "add_static".to_string(),
            operation(move |ctx, args| self.add_static(ctx, args)),
        );
        table
    }

    fn binding(&self) -> &PluginBinding {
        &self.binding
    }
}

#[test]
fn test_conflicting_operations() {
    let mut nginx = ConfigBuilder::with_defaults().unwrap();
    nginx.register_plugin(Dummy::new("first", &["shared"])).unwrap();

    let err = nginx
        .register_plugin(Dummy::new("second", &["unique", "shared"]))
        .unwrap_err();
    match err {
        Error::Conflict {
            plugin,
            loaded_plugin,
            operation,
        } => {
            assert_eq!(plugin, "second");
            assert_eq!(loaded_plugin, "first");
            assert_eq!(operation, "shared");
        }
        other => panic!("expected Conflict, got {other:?}"),
    }

    // registration is all or nothing
    assert!(!nginx.has_operation("unique"));
    assert_eq!(
        nginx.call("shared", ()).unwrap(),
        Reply::Text("first".to_string())
    );
}

#[test]
fn test_duplicate_plugin_name() {
    let mut nginx = ConfigBuilder::with_defaults().unwrap();
    let err = nginx
        .register_plugin(Dummy::new("server", &["add_other_server"]))
        .unwrap_err();
    assert!(matches!(err, Error::Conflict { ref operation, .. } if operation == "name"));
    assert!(!nginx.has_operation("add_other_server"));
}

#[test]
fn test_conflict_with_native_operation() {
    let mut nginx = ConfigBuilder::with_defaults().unwrap();
    let err = nginx
        .register_plugin(Dummy::new("sneaky", &["register_plugin"]))
        .unwrap_err();
    match err {
        Error::Conflict {
            loaded_plugin,
            operation,
            ..
        } => {
            assert_eq!(loaded_plugin, "top");
            assert_eq!(operation, "register_plugin");
        }
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[test]
fn test_builder_methods_cannot_be_shadowed() {
    let mut nginx = ConfigBuilder::with_defaults().unwrap();
    for name in ["descend", "http", "set_option", "current", "tree_mut", "settings"] {
        let err = nginx
            .register_plugin(Dummy::new("shadow", &[name]))
            .unwrap_err();
        match err {
            Error::Conflict {
                loaded_plugin,
                operation,
                ..
            } => {
                assert_eq!(loaded_plugin, "top");
                assert_eq!(operation, name);
            }
            other => panic!("expected Conflict for {name}, got {other:?}"),
        }
        assert!(!nginx.registry().contains(name));
    }
    assert!(nginx.registry().get("shadow").is_none());
}

#[test]
fn test_reserved_plugin_name() {
    let mut nginx = ConfigBuilder::with_defaults().unwrap();
    let err = nginx.register_plugin(Dummy::new("top", &["whatever"])).unwrap_err();
    assert!(matches!(err, Error::ReservedPluginName(ref name) if name == "top"));
    assert!(err.to_string().contains("protected name"));
}

#[test]
fn test_malformed_plugin_rejected() {
    let mut nginx = ConfigBuilder::with_defaults().unwrap();
    let err = nginx
        .register_plugin(Dummy::new("broken", &["not-an-identifier"]))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPlugin { .. }));
    let err = nginx.register_plugin(Dummy::new("", &["ok"])).unwrap_err();
    assert!(matches!(err, Error::InvalidPlugin { .. }));
}

#[test]
fn test_plugin_instance_owned_by_one_builder() {
    let shared = Dummy::new("shared", &["ping"]);
    let mut first = ConfigBuilder::with_defaults().unwrap();
    let mut second = ConfigBuilder::with_defaults().unwrap();

    first.register_plugin(shared.clone()).unwrap();
    assert_eq!(shared.binding().owner(), Some(first.id()));

    let err = second.register_plugin(shared).unwrap_err();
    assert!(matches!(err, Error::AlreadyOwned(ref name) if name == "shared"));
    assert!(!second.has_operation("ping"));
    assert!(first.has_operation("ping"));
}

#[test]
fn test_plugins_listing() {
    let mut nginx = ConfigBuilder::with_defaults().unwrap();
    nginx.register_plugin(Arc::new(ExpiresPlugin::default())).unwrap();
    let plugins = nginx.plugins();
    let expires = plugins.iter().find(|p| p.name == "expires").unwrap();
    assert_eq!(expires.operations, vec!["cache_route"]);
    assert_eq!(expires.valid_parents, vec!["location"]);
}

#[test]
fn test_custom_plugin_sets_top_options() {
    let mut nginx = ConfigBuilder::with_defaults().unwrap();
    nginx.register_plugin(Arc::new(ExpiresPlugin::default())).unwrap();

    {
        let mut server = nginx.enter("add_server", "example.com").unwrap();
        let mut route = server.enter("add_route", "/static").unwrap();
        let node = route.node();
        assert_eq!(
            route.call("cache_route", Args::new().option("ttl", "7d")).unwrap(),
            Reply::Node(node)
        );
    }

    let text = nginx.render();
    assert!(text.contains("\n    proxy_cache_path /tmp/cache keys_zone=default:10m;"));
    assert!(text.contains(
        "\n        location /static {\n            expires 7d;\n        }"
    ));
}

#[test]
fn test_custom_plugin_invalid_parent() {
    let mut nginx = ConfigBuilder::with_defaults().unwrap();
    nginx.register_plugin(Arc::new(ExpiresPlugin::default())).unwrap();
    let mut server = nginx.enter("add_server", ()).unwrap();
    let err = server.call("cache_route", ()).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidParent { ref plugin, ref parent, .. } if plugin == "expires" && parent == "server"
    ));
    let http = server.http();
    assert!(server.tree().option(http, "proxy_cache_path").is_none());
}

#[test]
fn test_nested_calls_share_the_cursor() {
    let mut nginx = ConfigBuilder::with_defaults().unwrap();
    nginx.register_plugin(Arc::new(StaticSitePlugin::default())).unwrap();

    // add_static opens a server from http, then a route inside it
    let node = nginx
        .call("add_static", Args::new().arg("/srv/www").option("path", "/assets"))
        .unwrap()
        .scope()
        .unwrap();
    assert_eq!(nginx.current(), Some(node));
    assert_eq!(nginx.tree().name(node), Some("location /assets"));

    nginx.end().end();
    assert_eq!(nginx.current(), Some(nginx.http()));

    let text = nginx.render();
    assert!(text.contains(
        "\n    server {\n        server_name _;\n        index index.html;\
         \n        location /assets {\n            root /srv/www;\n        }\n    }"
    ));
}

#[test]
fn test_detached_sections_from_plugins() {
    let mut nginx = ConfigBuilder::with_defaults().unwrap();
    let events = nginx.events();
    nginx
        .tree_mut()
        .attach(events, Block::new("upstream_like").option("use", "epoll"))
        .unwrap();
    let text = nginx.render();
    assert!(text.contains("\n    upstream_like {\n        use epoll;\n    }"));
}
