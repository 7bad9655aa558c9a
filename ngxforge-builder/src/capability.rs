//! Reusable pieces plugins compose to create scopes

use crate::args::{Args, Reply};
use crate::context::BuildContext;
use ngxforge_core::{Block, Error, Result, Section, Value};

/// Attaches a container under the cursor and moves the cursor into it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeOpener;

impl ScopeOpener {
    pub fn open(&self, ctx: &mut BuildContext<'_>, section: impl Into<Section>) -> Result<Reply> {
        let id = ctx.attach(section)?;
        ctx.descend(id);
        Ok(Reply::Scope(id))
    }
}

/// Creates `location` scopes. Routes nest under servers and other routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteMaker {
    opener: ScopeOpener,
}

impl RouteMaker {
    /// Keys consumed by [`RouteMaker::add_route`] rather than rendered.
    /// `path` can never become a directive of the location.
    pub const RESERVED_KEYS: &'static [&'static str] = &["path"];

    /// `add_route(path, **options)`: options become directives inside the
    /// new location. Passing the path both positionally and as `path` is
    /// rejected.
    pub fn add_route(&self, ctx: &mut BuildContext<'_>, args: &Args) -> Result<Reply> {
        let path = match args.single("add_route", 0, Self::RESERVED_KEYS)? {
            Some(path) if !path.is_empty() => path.to_text(),
            _ => {
                return Err(Error::InvalidArguments {
                    operation: "add_route".to_string(),
                    reason: "a path is required".to_string(),
                });
            }
        };

        let mut location = Block::location(path);
        for (key, value) in args.options_except(Self::RESERVED_KEYS) {
            location.set_option(key, value.clone());
        }
        self.opener.open(ctx, location)
    }
}

/// The single value given for `keys`, else `default`
pub(crate) fn value_or(
    operation: &str,
    args: &Args,
    index: usize,
    keys: &[&str],
    default: &str,
) -> Result<Value> {
    Ok(args
        .single(operation, index, keys)?
        .filter(|v| !v.is_empty())
        .cloned()
        .unwrap_or_else(|| Value::from(default)))
}
