use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde_json::Value;

/// The generic nested shape every indexed entity is reduced to. The query
/// engine evaluates nothing else; host objects reach this shape through
/// [`serde_json::Value`], so anything serializable can be indexed.
///
/// ```
/// use indufind::RecordValue;
/// use serde_json::json;
///
/// let record = RecordValue::from(json!({"tag": "=A1-M2", "links": [1, 2]}));
/// assert!(matches!(record, RecordValue::Map(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// String-keyed mapping. Keys are stored raw; lookups normalize both
    /// sides, values are never rewritten.
    Map(BTreeMap<String, RecordValue>),
    /// Ordered list. A path walk entering a list matches if any element
    /// matches the remaining path.
    List(Vec<RecordValue>),
    /// Leaf value.
    Scalar(Scalar),
}

/// Leaf values a record can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Num(serde_json::Number),
    Bool(bool),
    Null,
}

impl From<Value> for RecordValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(entries) => RecordValue::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, RecordValue::from(value)))
                    .collect(),
            ),
            Value::Array(items) => {
                RecordValue::List(items.into_iter().map(RecordValue::from).collect())
            }
            Value::String(text) => RecordValue::Scalar(Scalar::Str(text)),
            Value::Number(num) => RecordValue::Scalar(Scalar::Num(num)),
            Value::Bool(flag) => RecordValue::Scalar(Scalar::Bool(flag)),
            Value::Null => RecordValue::Scalar(Scalar::Null),
        }
    }
}

impl RecordValue {
    /// Looks up the map entry whose key normalizes to `normalized_key`.
    /// Returns `None` on non-maps and missing keys alike.
    pub(crate) fn get_normalized(&self, normalized_key: &str) -> Option<&RecordValue> {
        match self {
            RecordValue::Map(entries) => entries
                .iter()
                .find(|(key, _)| textnorm::normalize(key) == normalized_key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Borrows the inner string of a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordValue::Scalar(Scalar::Str(text)) => Some(text),
            _ => None,
        }
    }

    /// Renders the value as text for the substring check. Scalars render
    /// bare (`Null` as the empty string); maps and lists render in a stable
    /// `{k: v}` / `[a, b]` shape.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            RecordValue::Scalar(Scalar::Str(text)) => out.push_str(text),
            RecordValue::Scalar(Scalar::Num(num)) => {
                let _ = write!(out, "{num}");
            }
            RecordValue::Scalar(Scalar::Bool(flag)) => {
                let _ = write!(out, "{flag}");
            }
            RecordValue::Scalar(Scalar::Null) => {}
            RecordValue::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.render_into(out);
                }
                out.push(']');
            }
            RecordValue::Map(entries) => {
                out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(key);
                    out.push_str(": ");
                    value.render_into(out);
                }
                out.push('}');
            }
        }
    }
}
