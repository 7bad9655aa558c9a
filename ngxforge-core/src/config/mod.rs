//! Builder settings and their loader

mod format;
mod loader;
mod types;

pub use format::Format;
pub use loader::SettingsLoader;
pub use types::{BuilderSettings, WorkerProcesses};
