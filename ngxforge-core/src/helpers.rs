//! Convenience utilities for building configs by hand

use crate::tree::{Block, EmptyBlock, Section, Value};
use std::thread;

/// Concatenate the rendered text of several detached sections.
pub fn dumps<'a, I>(sections: I) -> String
where
    I: IntoIterator<Item = &'a Section>,
{
    sections.into_iter().map(ToString::to_string).collect()
}

/// Build a group that renders `key` once per value, each on its own line.
///
/// ```
/// use ngxforge_core::helpers::duplicate_options;
///
/// let dupes = duplicate_options("uwsgi_cache_valid", [vec!["404", "5s"], vec!["200", "60s"]]);
/// assert_eq!(dupes.to_string(), "\nuwsgi_cache_valid 404 5s;\nuwsgi_cache_valid 200 60s;");
/// ```
pub fn duplicate_options<I, V>(key: &str, values: I) -> EmptyBlock
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let mut duplicates = EmptyBlock::new();
    duplicates.add_sections(
        values
            .into_iter()
            .map(|value| EmptyBlock::new().option(key, value)),
    );
    duplicates
}

/// A small but complete configuration listening on `port`.
pub fn simple_configuration(port: u16) -> EmptyBlock {
    let workers = thread::available_parallelism().map_or(1, |n| n.get());

    let http = Block::new("http")
        .option("access_log", ["logs/access.log", "combined"])
        .section(
            Block::new("server")
                .option("listen", port)
                .section(Block::location("/")),
        );

    let events = Block::new("events").option("worker_connections", 4096);

    let top = EmptyBlock::new()
        .option("worker_processes", workers)
        .option("error_log", "logs/error.log");

    EmptyBlock::new().section(top).section(events).section(http)
}
