//! Leaf directives

use super::render::push_line;
use super::value::Value;
use std::fmt;

/// A single configuration statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `name;`
    Key { name: String },
    /// `name value;` with the value kept as one opaque token
    KeyValue { name: String, value: String },
    /// `name v1 v2 ...;`
    KeyMultiValue { name: String, values: Vec<String> },
    /// `<offset># text`
    Comment { offset: String, text: String },
}

impl Directive {
    pub fn key(name: impl Into<String>) -> Self {
        Directive::Key { name: name.into() }
    }

    /// Key/value directive. Booleans and integers are coerced, lists are
    /// space-joined; the result is never re-split.
    pub fn key_value(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Directive::KeyValue {
            name: name.into(),
            value: value.into().to_text(),
        }
    }

    pub fn key_multi_value<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Directive::KeyMultiValue {
            name: name.into(),
            values: values.into_iter().map(|v| v.into().to_text()).collect(),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::comment_with_offset("", text)
    }

    pub fn comment_with_offset(offset: impl Into<String>, text: impl Into<String>) -> Self {
        Directive::Comment {
            offset: offset.into(),
            text: text.into(),
        }
    }

    /// Wrap a raw option value into the matching directive variant.
    ///
    /// Strings containing whitespace are split into a multi-value
    /// directive, so `"a  b"` renders as `a b`.
    pub fn from_option(name: &str, value: &Value) -> Self {
        if value.is_empty() {
            return Directive::key(name);
        }
        match value {
            Value::List(items) => Directive::key_multi_value(name, items.iter().cloned()),
            Value::Str(s) if s.chars().any(char::is_whitespace) => {
                Directive::key_multi_value(name, s.split_whitespace())
            }
            other => Directive::key_value(name, other.clone()),
        }
    }

    /// Directive name; comments have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Directive::Key { name }
            | Directive::KeyValue { name, .. }
            | Directive::KeyMultiValue { name, .. } => Some(name),
            Directive::Comment { .. } => None,
        }
    }

    /// The statement without indentation, e.g. `listen 80;`
    pub fn statement(&self) -> String {
        match self {
            Directive::Key { name } => format!("{name};"),
            Directive::KeyValue { name, value } => format!("{name} {value};"),
            Directive::KeyMultiValue { name, values } => {
                let values: Vec<&str> = values
                    .iter()
                    .map(String::as_str)
                    .filter(|v| !v.is_empty())
                    .collect();
                if values.is_empty() {
                    format!("{name};")
                } else {
                    format!("{name} {};", values.join(" "))
                }
            }
            Directive::Comment { offset, text } => format!("{offset}# {text}"),
        }
    }

    pub(crate) fn render_into(&self, out: &mut String, depth: usize) {
        push_line(out, depth, &self.statement());
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        f.write_str(&out)
    }
}
