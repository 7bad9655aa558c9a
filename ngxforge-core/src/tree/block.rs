//! Detached containers
//!
//! `Block` and `EmptyBlock` are plain owned values. They carry no parent
//! reference; one is set only when the value is attached to a
//! [`ConfigTree`](super::ConfigTree).

use super::directive::Directive;
use super::render::render_container;
use super::value::Value;
use indexmap::IndexMap;
use std::fmt;

/// Options and child sections shared by both container kinds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    pub options: IndexMap<String, Value>,
    pub sections: Vec<Section>,
}

impl Body {
    fn render_into(&self, out: &mut String, depth: usize, name: Option<&str>) {
        render_container(out, depth, name, &self.options, |out, child_depth| {
            for section in &self.sections {
                section.render_into(out, child_depth);
            }
        });
    }
}

/// A named, brace-delimited container such as `http`, `server` or
/// `location /`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    name: String,
    body: Body,
}

/// An anonymous container: its children render flattened into the
/// enclosing scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmptyBlock {
    body: Body,
}

/// Anything that can sit in a container's section list
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Block(Block),
    Empty(EmptyBlock),
    Directive(Directive),
}

macro_rules! container_methods {
    () => {
        /// Set an option, builder style.
        pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
            self.set_option(key, value);
            self
        }

        /// Append a child section, builder style.
        pub fn section(mut self, section: impl Into<Section>) -> Self {
            self.add_section(section);
            self
        }

        /// Set an option. An existing key keeps its position and gets the
        /// new value.
        pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<Value>) {
            self.body.options.insert(key.into(), value.into());
        }

        pub fn add_section(&mut self, section: impl Into<Section>) {
            self.body.sections.push(section.into());
        }

        pub fn add_sections<I, S>(&mut self, sections: I)
        where
            I: IntoIterator<Item = S>,
            S: Into<Section>,
        {
            self.body.sections.extend(sections.into_iter().map(Into::into));
        }

        pub fn options(&self) -> &IndexMap<String, Value> {
            &self.body.options
        }

        pub fn sections(&self) -> &[Section] {
            &self.body.sections
        }

        /// First child section with this name.
        pub fn find_section(&self, name: &str) -> Option<&Section> {
            self.body.sections.iter().find(|s| s.name() == Some(name))
        }

        pub(crate) fn into_body(self) -> Body {
            self.body
        }
    };
}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Body::default(),
        }
    }

    /// `location <path> { ... }`
    pub fn location(path: impl AsRef<str>) -> Self {
        Self::new(format!("location {}", path.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    container_methods!();

    pub(crate) fn render_into(&self, out: &mut String, depth: usize) {
        self.body.render_into(out, depth, Some(&self.name));
    }
}

impl EmptyBlock {
    pub fn new() -> Self {
        Self::default()
    }

    container_methods!();

    pub(crate) fn render_into(&self, out: &mut String, depth: usize) {
        self.body.render_into(out, depth, None);
    }
}

impl Section {
    /// Name the section is addressable by, if any
    pub fn name(&self) -> Option<&str> {
        match self {
            Section::Block(b) => Some(b.name()),
            Section::Empty(_) => None,
            Section::Directive(d) => d.name(),
        }
    }

    pub(crate) fn render_into(&self, out: &mut String, depth: usize) {
        match self {
            Section::Block(b) => b.render_into(out, depth),
            Section::Empty(e) => e.render_into(out, depth),
            Section::Directive(d) => d.render_into(out, depth),
        }
    }
}

impl From<Block> for Section {
    fn from(b: Block) -> Self {
        Section::Block(b)
    }
}

impl From<EmptyBlock> for Section {
    fn from(e: EmptyBlock) -> Self {
        Section::Empty(e)
    }
}

impl From<Directive> for Section {
    fn from(d: Directive) -> Self {
        Section::Directive(d)
    }
}

macro_rules! display_rendered {
    ($($t:ty),*) => {
        $(
            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let mut out = String::new();
                    self.render_into(&mut out, 0);
                    f.write_str(&out)
                }
            }
        )*
    };
}

display_rendered!(Block, EmptyBlock, Section);
