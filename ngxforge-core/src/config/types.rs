//! Builder settings
//!
//! These are the named options accepted when constructing a config builder.

use crate::tree::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Settings for a new config builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderSettings {
    /// Number of worker processes (default: auto)
    #[serde(default)]
    pub worker_processes: WorkerProcesses,

    /// Connections per worker (default: 512)
    #[serde(default = "default_worker_connections")]
    pub worker_connections: u32,

    /// Error log destination (default: logs/error.log)
    #[serde(default = "default_error_log")]
    pub error_log: String,

    /// Run in the background (default: off)
    #[serde(default)]
    pub daemon: bool,
}

fn default_worker_connections() -> u32 {
    512
}

fn default_error_log() -> String {
    "logs/error.log".to_string()
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            worker_processes: WorkerProcesses::default(),
            worker_connections: default_worker_connections(),
            error_log: default_error_log(),
            daemon: false,
        }
    }
}

/// Worker process count: either `auto` or a fixed number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "WorkerProcessesRepr", into = "WorkerProcessesRepr")]
pub enum WorkerProcesses {
    #[default]
    Auto,
    Count(u32),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WorkerProcessesRepr {
    Count(u32),
    Keyword(String),
}

impl TryFrom<WorkerProcessesRepr> for WorkerProcesses {
    type Error = String;

    fn try_from(repr: WorkerProcessesRepr) -> Result<Self, Self::Error> {
        match repr {
            WorkerProcessesRepr::Count(n) => Ok(WorkerProcesses::Count(n)),
            WorkerProcessesRepr::Keyword(k) if k == "auto" => Ok(WorkerProcesses::Auto),
            WorkerProcessesRepr::Keyword(k) => k
                .parse()
                .map(WorkerProcesses::Count)
                .map_err(|_| format!("expected `auto` or a number, got `{k}`")),
        }
    }
}

impl From<WorkerProcesses> for WorkerProcessesRepr {
    fn from(w: WorkerProcesses) -> Self {
        match w {
            WorkerProcesses::Auto => WorkerProcessesRepr::Keyword("auto".to_string()),
            WorkerProcesses::Count(n) => WorkerProcessesRepr::Count(n),
        }
    }
}

impl From<WorkerProcesses> for Value {
    fn from(w: WorkerProcesses) -> Self {
        match w {
            WorkerProcesses::Auto => Value::from("auto"),
            WorkerProcesses::Count(n) => Value::from(n),
        }
    }
}

impl fmt::Display for WorkerProcesses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerProcesses::Auto => f.write_str("auto"),
            WorkerProcesses::Count(n) => write!(f, "{n}"),
        }
    }
}
