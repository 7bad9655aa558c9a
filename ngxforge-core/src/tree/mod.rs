//! Config tree model and renderer
//!
//! Detached values ([`Block`], [`EmptyBlock`], [`Directive`]) are built by
//! callers and presets, then moved into a [`ConfigTree`] which owns them and
//! tracks parent references.

mod block;
mod directive;
mod node;
mod render;
mod value;

pub use block::{Block, Body, EmptyBlock, Section};
pub use directive::Directive;
pub use node::{ConfigTree, Container, Node, NodeId, NodeKind};
pub use render::{INDENT_CHAR, INDENT_WIDTH, indent};
pub use value::Value;
