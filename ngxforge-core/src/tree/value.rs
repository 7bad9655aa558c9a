//! Raw option values
//!
//! Values are stored unwrapped in a container's options mapping and only
//! turned into directives when the container is rendered.

use serde::{Deserialize, Serialize};

/// A raw directive value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Renders as `on` / `off`
    Bool(bool),
    /// Renders as decimal text
    Int(i64),
    /// Renders with at least one fractional digit (`1.1`, `2.0`)
    Float(f64),
    /// A string; whitespace inside splits it into several values
    Str(String),
    /// Space-joined sequence of values
    List(Vec<Value>),
    /// No value: `name;`
    #[default]
    Empty,
}

impl Value {
    /// Stringify a value the way it appears in rendered output.
    pub fn to_text(&self) -> String {
        match self {
            Value::Bool(true) => "on".to_string(),
            Value::Bool(false) => "off".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::to_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            Value::Empty => String::new(),
        }
    }

    /// True when the value renders as a valueless directive.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Str(s) => s.is_empty(),
            Value::List(items) => items.iter().all(Value::is_empty),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(v as i64)
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or_else(|_| Value::Str(v.to_string()), Value::Int)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_render_as_on_off() {
        assert_eq!(Value::from(true).to_text(), "on");
        assert_eq!(Value::from(false).to_text(), "off");
    }

    #[test]
    fn lists_join_with_spaces() {
        let v = Value::from(vec![Value::from(4), Value::from("4k")]);
        assert_eq!(v.to_text(), "4 4k");
    }

    #[test]
    fn floats_keep_a_fractional_digit() {
        assert_eq!(Value::from(1.1).to_text(), "1.1");
        assert_eq!(Value::from(2.0).to_text(), "2.0");
        assert_eq!(Value::from(0.5f32).to_text(), "0.5");
        assert!(!Value::from(0.0).is_empty());
    }

    #[test]
    fn emptiness() {
        assert!(Value::Empty.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::from(Vec::<String>::new()).is_empty());
        assert!(!Value::from(0).is_empty());
        assert!(!Value::from(false).is_empty());
    }

    #[test]
    fn deserializes_untagged() {
        let v: Value = serde_json::from_str(r#"["a", 1, true]"#).unwrap();
        assert_eq!(v.to_text(), "a 1 on");
        let v: Value = serde_json::from_str("[1, 1.1]").unwrap();
        assert_eq!(v, Value::List(vec![Value::Int(1), Value::Float(1.1)]));
        let v: Value = serde_json::from_str("null").unwrap();
        assert_eq!(v, Value::Empty);
    }
}
