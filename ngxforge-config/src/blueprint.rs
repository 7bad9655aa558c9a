//! Blueprint document types
//!
//! A blueprint describes a whole configuration declaratively: builder
//! settings, extra global and `http` options, and a list of servers with
//! (possibly nested) routes.

use indexmap::IndexMap;
use ngxforge_core::Value;
use ngxforge_core::config::BuilderSettings;
use serde::{Deserialize, Serialize};

/// Option table: directive name -> value, in document order
pub type Options = IndexMap<String, Value>;

/// Root blueprint document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Blueprint {
    /// Settings for the builder's root sections
    #[serde(default)]
    pub settings: BuilderSettings,

    /// Extra directives for the global section
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub globals: Options,

    /// Extra directives for the `http` block
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub http: Options,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<ServerBlueprint>,
}

/// A `server` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerBlueprint {
    /// Rendered as `server_name`; `_` when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: Options,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteBlueprint>,
}

/// A `location` block. Routes nest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteBlueprint {
    pub path: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: Options,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteBlueprint>,
}

impl Blueprint {
    /// Number of routes across every server, nested ones included
    pub fn route_count(&self) -> usize {
        fn count(routes: &[RouteBlueprint]) -> usize {
            routes.iter().map(|r| 1 + count(&r.routes)).sum()
        }
        self.servers.iter().map(|s| count(&s.routes)).sum()
    }
}
