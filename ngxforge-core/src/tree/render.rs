//! Indentation-aware serialization shared by detached values and the arena

use super::directive::Directive;
use super::value::Value;
use indexmap::IndexMap;

/// Spaces per nesting level
pub const INDENT_WIDTH: usize = 4;
/// Character used for indentation
pub const INDENT_CHAR: char = ' ';

/// Indentation prefix for a depth
pub fn indent(depth: usize) -> String {
    std::iter::repeat_n(INDENT_CHAR, INDENT_WIDTH * depth).collect()
}

/// Append one rendered line: newline, indentation, text.
pub(crate) fn push_line(out: &mut String, depth: usize, text: &str) {
    out.push('\n');
    out.push_str(&indent(depth));
    out.push_str(text);
}

/// Render a container: options first (in mapping order), then sections.
///
/// Named containers wrap their children in `name { ... }` one level deeper;
/// anonymous ones emit their children at their own depth.
pub(crate) fn render_container<F>(
    out: &mut String,
    depth: usize,
    name: Option<&str>,
    options: &IndexMap<String, Value>,
    render_sections: F,
) where
    F: FnOnce(&mut String, usize),
{
    let child_depth = match name {
        Some(name) => {
            push_line(out, depth, &format!("{name} {{"));
            depth + 1
        }
        None => depth,
    };

    for (key, value) in options {
        Directive::from_option(key, value).render_into(out, child_depth);
    }
    render_sections(out, child_depth);

    if name.is_some() {
        push_line(out, depth, "}");
    }
}
