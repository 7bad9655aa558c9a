//! Arena-backed config tree
//!
//! The tree owns every attached node. Children refer to their parent by
//! [`NodeId`]; the reference is written when a node is attached and
//! rewritten (or cleared) whenever it is moved or detached.

use super::block::{Body, Section};
use super::directive::Directive;
use super::render::render_container;
use super::value::Value;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::fmt;

/// Handle to a node stored in a [`ConfigTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A container stored in the arena. `name == None` is an anonymous
/// (empty) block.
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub name: Option<String>,
    pub options: IndexMap<String, Value>,
    sections: Vec<NodeId>,
}

impl Container {
    pub fn sections(&self) -> &[NodeId] {
        &self.sections
    }

    /// First word of the header, or `None` for anonymous containers.
    pub fn head(&self) -> Option<&str> {
        self.name.as_deref().and_then(|n| n.split_whitespace().next())
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Container(Container),
    Directive(Directive),
}

#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Container(c) => c.name.as_deref(),
            NodeKind::Directive(d) => d.name(),
        }
    }
}

/// Owner of a config hierarchy. Always has an anonymous root container.
#[derive(Debug, Clone)]
pub struct ConfigTree {
    nodes: Vec<Node>,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                kind: NodeKind::Container(Container::default()),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(Error::UnknownNode(id.0))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn container(&self, id: NodeId) -> Result<&Container> {
        match &self.node(id)?.kind {
            NodeKind::Container(c) => Ok(c),
            NodeKind::Directive(_) => Err(Error::NotAContainer(id.0)),
        }
    }

    fn container_mut(&mut self, id: NodeId) -> Result<&mut Container> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Container(c)) => Ok(c),
            Some(NodeKind::Directive(_)) => Err(Error::NotAContainer(id.0)),
            None => Err(Error::UnknownNode(id.0)),
        }
    }

    /// Move a detached section (and everything inside it) into the tree
    /// under `parent`.
    pub fn attach(&mut self, parent: NodeId, section: impl Into<Section>) -> Result<NodeId> {
        self.container(parent)?;
        let id = self.insert(Some(parent), section.into());
        self.container_mut(parent)?.sections.push(id);
        tracing::debug!(parent = %parent, node = %id, "attached node");
        Ok(id)
    }

    fn insert(&mut self, parent: Option<NodeId>, section: Section) -> NodeId {
        let (name, body) = match section {
            Section::Directive(d) => return self.push(parent, NodeKind::Directive(d)),
            Section::Block(b) => (Some(b.name().to_string()), b.into_body()),
            Section::Empty(e) => (None, e.into_body()),
        };
        let Body { options, sections } = body;
        let id = self.push(
            parent,
            NodeKind::Container(Container {
                name,
                options,
                sections: Vec::new(),
            }),
        );
        let children: Vec<NodeId> = sections
            .into_iter()
            .map(|child| self.insert(Some(id), child))
            .collect();
        if let NodeKind::Container(c) = &mut self.nodes[id.0].kind {
            c.sections = children;
        }
        id
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent, kind });
        id
    }

    /// Remove a node from its parent's section list and clear its parent
    /// reference.
    ///
    /// The arena never shrinks: a detached node keeps its slot, and its
    /// [`NodeId`] stays valid for [`ConfigTree::reattach`]. Trees that
    /// detach many nodes should be rebuilt rather than reused.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        self.container_mut(parent)?.sections.retain(|s| *s != id);
        self.nodes[id.0].parent = None;
        Ok(())
    }

    /// Move an existing node under a new parent.
    pub fn reattach(&mut self, id: NodeId, new_parent: NodeId) -> Result<()> {
        self.node(id)?;
        self.container(new_parent)?;
        if self.is_ancestor_or_self(id, new_parent) {
            return Err(Error::Cycle {
                node: id.0,
                parent: new_parent.0,
            });
        }
        self.detach(id)?;
        self.container_mut(new_parent)?.sections.push(id);
        self.nodes[id.0].parent = Some(new_parent);
        Ok(())
    }

    /// True if `ancestor` is `node` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn set_option(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<()> {
        self.container_mut(id)?
            .options
            .insert(key.into(), value.into());
        Ok(())
    }

    /// Mutable access to an option value, inserting `default` first if the
    /// key is missing.
    pub fn option_entry(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        default: impl Into<Value>,
    ) -> Result<&mut Value> {
        Ok(self
            .container_mut(id)?
            .options
            .entry(key.into())
            .or_insert_with(|| default.into()))
    }

    pub fn option(&self, id: NodeId, key: &str) -> Option<&Value> {
        self.container(id).ok().and_then(|c| c.options.get(key))
    }

    pub fn sections(&self, id: NodeId) -> &[NodeId] {
        self.container(id).map(Container::sections).unwrap_or(&[])
    }

    /// First child section whose name matches exactly.
    pub fn find_section(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.sections(id)
            .iter()
            .copied()
            .find(|child| self.name(*child) == Some(name))
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).and_then(Node::name)
    }

    /// Number of named blocks above the node; anonymous containers add no
    /// nesting.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if matches!(
                &self.nodes[parent.0].kind,
                NodeKind::Container(Container { name: Some(_), .. })
            ) {
                depth += 1;
            }
            current = self.parent(parent);
        }
        depth
    }

    /// Render a node and its descendants starting at depth 0.
    pub fn render(&self, id: NodeId) -> Result<String> {
        self.node(id)?;
        let mut out = String::new();
        self.render_node(id, 0, &mut out);
        Ok(out)
    }

    fn render_node(&self, id: NodeId, depth: usize, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Directive(d) => d.render_into(out, depth),
            NodeKind::Container(c) => {
                render_container(out, depth, c.name.as_deref(), &c.options, |out, child_depth| {
                    for child in c.sections.iter().filter(|child| **child != id) {
                        self.render_node(*child, child_depth, out);
                    }
                });
            }
        }
    }
}

impl fmt::Display for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render_node(self.root(), 0, &mut out);
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::tree::{Block, EmptyBlock};

    #[test]
    fn attach_sets_parent_recursively() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let http = tree
            .attach(root, Block::new("http").section(Block::new("server")))
            .unwrap();
        let server = tree.sections(http)[0];
        assert_eq!(tree.parent(http), Some(root));
        assert_eq!(tree.parent(server), Some(http));
        assert_eq!(tree.name(server), Some("server"));
    }

    #[test]
    fn attach_rejects_directive_parent() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let d = tree.attach(root, Directive::key("internal")).unwrap();
        assert!(matches!(
            tree.attach(d, Block::new("x")),
            Err(Error::NotAContainer(_))
        ));
    }

    #[test]
    fn reattach_updates_parent() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let a = tree.attach(root, Block::new("a")).unwrap();
        let b = tree.attach(root, Block::new("b")).unwrap();
        let c = tree.attach(a, Block::new("c")).unwrap();

        tree.reattach(c, b).unwrap();
        assert_eq!(tree.parent(c), Some(b));
        assert!(tree.sections(a).is_empty());
        assert_eq!(tree.sections(b), &[c]);
    }

    #[test]
    fn reattach_rejects_cycles() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let a = tree.attach(root, Block::new("a")).unwrap();
        let b = tree.attach(a, Block::new("b")).unwrap();

        assert!(matches!(tree.reattach(a, a), Err(Error::Cycle { .. })));
        assert!(matches!(tree.reattach(a, b), Err(Error::Cycle { .. })));
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.sections(a), &[b]);
    }

    #[test]
    fn detach_clears_parent() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let a = tree.attach(root, Block::new("a")).unwrap();
        tree.detach(a).unwrap();
        assert_eq!(tree.parent(a), None);
        assert!(tree.sections(root).is_empty());
        assert_eq!(tree.to_string(), "");
    }

    #[test]
    fn detached_node_keeps_its_slot() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let a = tree.attach(root, Block::new("a").option("x", 1)).unwrap();
        let b = tree.attach(root, Block::new("b")).unwrap();
        tree.detach(a).unwrap();
        assert_eq!(tree.name(a), Some("a"));

        let c = tree.attach(root, Block::new("c")).unwrap();
        assert_ne!(c, a);
        tree.reattach(a, b).unwrap();
        assert_eq!(tree.parent(a), Some(b));
        assert_eq!(tree.to_string(), "\nb {\n    a {\n        x 1;\n    }\n}\nc {\n}");
    }

    #[test]
    fn depth_ignores_anonymous_containers() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let http = tree.attach(root, Block::new("http")).unwrap();
        let group = tree.attach(http, EmptyBlock::new()).unwrap();
        let server = tree.attach(group, Block::new("server")).unwrap();
        assert_eq!(tree.depth(http), 0);
        assert_eq!(tree.depth(server), 1);
    }

    #[test]
    fn find_section_returns_first_match() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let first = tree.attach(root, Block::new("server")).unwrap();
        tree.attach(root, Block::new("server")).unwrap();
        assert_eq!(tree.find_section(root, "server"), Some(first));
        assert_eq!(tree.find_section(root, "events"), None);
    }

    #[test]
    fn tree_render_matches_detached_render() {
        let block = Block::new("http")
            .option("sendfile", true)
            .section(Block::location("/").option("root", "html"));
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let id = tree.attach(root, block.clone()).unwrap();
        assert_eq!(tree.render(id).unwrap(), block.to_string());
        assert_eq!(tree.to_string(), block.to_string());
    }

    #[test]
    fn option_entry_inserts_default() {
        let mut tree = ConfigTree::new();
        let root = tree.root();
        let http = tree.attach(root, Block::new("http")).unwrap();
        if let Value::List(items) = tree.option_entry(http, "add_header", Vec::<Value>::new()).unwrap() {
            items.push("X-Cache".into());
        }
        assert_eq!(tree.option(http, "add_header").unwrap().to_text(), "X-Cache");
    }
}
