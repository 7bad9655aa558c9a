//! Operation arguments and results

use indexmap::IndexMap;
use ngxforge_core::{Error, NodeId, Result, Value};

/// Arguments passed to a builder operation: positional values plus named
/// options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    positional: Vec<Value>,
    options: IndexMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a named option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    pub fn options(&self) -> &IndexMap<String, Value> {
        &self.options
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    pub fn named(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Positional argument `index`, falling back to the first of `keys`
    /// present as a named option.
    pub fn lookup(&self, index: usize, keys: &[&str]) -> Option<&Value> {
        self.get(index)
            .or_else(|| keys.iter().find_map(|key| self.named(key)))
    }

    /// Like [`Args::lookup`], but the argument may be given only once:
    /// positionally or under exactly one of `keys`.
    pub fn single(&self, operation: &str, index: usize, keys: &[&str]) -> Result<Option<&Value>> {
        let mut given = self
            .get(index)
            .into_iter()
            .chain(keys.iter().filter_map(|key| self.named(key)));
        let first = given.next();
        if given.next().is_some() {
            return Err(Error::InvalidArguments {
                operation: operation.to_string(),
                reason: format!("`{}` given more than once", keys.join("`/`")),
            });
        }
        Ok(first)
    }

    /// Named options other than `exclude`, in insertion order.
    pub fn options_except<'a>(
        &'a self,
        exclude: &'a [&'a str],
    ) -> impl Iterator<Item = (&'a String, &'a Value)> + 'a {
        self.options
            .iter()
            .filter(move |(key, _)| !exclude.contains(&key.as_str()))
    }
}

impl From<()> for Args {
    fn from(_: ()) -> Self {
        Args::new()
    }
}

impl From<&str> for Args {
    fn from(value: &str) -> Self {
        Args::new().arg(value)
    }
}

impl From<String> for Args {
    fn from(value: String) -> Self {
        Args::new().arg(value)
    }
}

/// Result of a builder operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to report
    Unit,
    /// A node was looked up; the cursor did not move
    Node(NodeId),
    /// A new scope was opened and the cursor now points at it
    Scope(NodeId),
    /// Rendered or computed text
    Text(String),
}

impl Reply {
    pub fn scope(&self) -> Option<NodeId> {
        match self {
            Reply::Scope(id) => Some(*id),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::Text(s) => Some(s),
            _ => None,
        }
    }
}
