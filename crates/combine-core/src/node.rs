//! Tagged node kinds for YAML document trees
//!
//! Documents are plain `serde_yaml::Value` trees. `Mapping` keeps keys in
//! declaration order, which the resolver's override precedence depends on.

use std::fmt;

use serde_yaml::Value;

/// The key that marks a mapping as a cross-document reference
pub const XREF_KEY: &str = "$xref";

/// The closed set of node kinds the merger and resolver distinguish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Boolean,
    /// Integers and floats alike
    Number,
    String,
    Sequence,
    Mapping,
    /// A value carrying an explicit YAML tag (`!foo bar`)
    Tagged,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Sequence(_) => Self::Sequence,
            Value::Mapping(_) => Self::Mapping,
            Value::Tagged(_) => Self::Tagged,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Tagged => "tagged",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a mapping key the way it would appear as a plain scalar.
///
/// Used for error key paths and for matching pointer segments against
/// non-string keys such as HTTP status codes (`200:`).
pub fn render_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(source: &str) -> Value {
        serde_yaml::from_str(source).unwrap()
    }

    #[test]
    fn integers_and_floats_share_a_kind() {
        assert_eq!(NodeKind::of(&yaml("3")), NodeKind::Number);
        assert_eq!(NodeKind::of(&yaml("3.5")), NodeKind::Number);
    }

    #[test]
    fn kinds_of_structured_nodes() {
        assert_eq!(NodeKind::of(&yaml("{a: 1}")), NodeKind::Mapping);
        assert_eq!(NodeKind::of(&yaml("[1, 2]")), NodeKind::Sequence);
        assert_eq!(NodeKind::of(&yaml("~")), NodeKind::Null);
        assert_eq!(NodeKind::of(&yaml("!thing x")), NodeKind::Tagged);
    }

    #[test]
    fn render_key_for_scalars() {
        assert_eq!(render_key(&yaml("200")), Some("200".to_string()));
        assert_eq!(render_key(&yaml("true")), Some("true".to_string()));
        assert_eq!(render_key(&yaml("[1]")), None);
    }
}
