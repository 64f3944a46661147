//! Embedding-safe JSON serialization for JSON-LD script elements.
//!
//! Every string in the tree, keys included, has the five characters
//! `& < > " '` replaced by character references before the JSON writer
//! quotes it, so a payload like `</script>` can never close the element it
//! is embedded in. Absent values are dropped from objects and written as
//! `null` inside arrays.

use crate::domain::model::{Indent, SerializedText, Value};
use crate::utils::error::{JsonLdError, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Characters that may not appear raw in an embedded JSON-LD payload, with
/// their replacements.
pub const ENTITIES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&apos;"),
];

fn entity_for(c: char) -> Option<&'static str> {
    ENTITIES
        .iter()
        .find(|(raw, _)| *raw == c)
        .map(|(_, entity)| *entity)
}

/// Replaces `& < > " '` with their character references in one pass.
///
/// Returns the input unchanged (borrowed) when it holds none of them.
pub fn escape_entities(input: &str) -> Cow<'_, str> {
    let Some(first) = input.find(|c: char| entity_for(c).is_some()) else {
        return Cow::Borrowed(input);
    };

    let mut escaped = String::with_capacity(input.len() + 8);
    escaped.push_str(&input[..first]);
    for c in input[first..].chars() {
        match entity_for(c) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Serializes `value` into embedding-safe JSON.
pub fn serialize(value: &Value, indent: &Indent) -> Result<SerializedText> {
    SafeSerializer::new()
        .with_indent(indent.clone())
        .serialize(value)
}

#[derive(Debug, Clone, Default)]
pub struct SafeSerializer {
    indent: Indent,
}

impl SafeSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn indent(&self) -> &Indent {
        &self.indent
    }

    pub fn serialize(&self, value: &Value) -> Result<SerializedText> {
        // A root with no containing structure still needs a JSON document.
        let tree = sanitize(value).unwrap_or(serde_json::Value::Null);
        let text = write(&tree, &self.indent)?;
        debug!(kind = value.kind(), bytes = text.len(), "serialized JSON-LD item");
        Ok(SerializedText::new(text))
    }

    /// Serializes any serde-serializable item, rejecting data outside the
    /// JSON value union with [`JsonLdError::UnsupportedValueType`].
    pub fn serialize_any<T: Serialize + ?Sized>(&self, item: &T) -> Result<SerializedText> {
        let value = Value::from_serialize(item)?;
        self.serialize(&value)
    }
}

/// Returns `None` for values the parent container must drop or null out.
fn sanitize(value: &Value) -> Option<serde_json::Value> {
    match value {
        Value::Null | Value::Undefined => None,
        Value::Bool(b) => Some(serde_json::Value::Bool(*b)),
        Value::Number(n) => Some(serde_json::Value::Number(normalize_number(n))),
        // No JSON literal exists; the key stays and the value becomes null.
        Value::NonFinite(_) => Some(serde_json::Value::Null),
        Value::String(s) => Some(serde_json::Value::String(escape_entities(s).into_owned())),
        Value::Array(items) => Some(serde_json::Value::Array(
            items
                .iter()
                .map(|item| sanitize(item).unwrap_or(serde_json::Value::Null))
                .collect(),
        )),
        Value::Object(map) => {
            let mut object = serde_json::Map::with_capacity(map.len());
            for (key, child) in map {
                match sanitize(child) {
                    Some(child) => {
                        object.insert(escape_entities(key).into_owned(), child);
                    }
                    None => trace!(key = %key, "omitting absent property"),
                }
            }
            Some(serde_json::Value::Object(object))
        }
    }
}

/// Integral floats below this magnitude are written without a fraction,
/// e.g. `1.0` as `1`.
const INTEGRAL_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn normalize_number(n: &serde_json::Number) -> serde_json::Number {
    match n.as_f64() {
        Some(f)
            if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < INTEGRAL_FLOAT_LIMIT =>
        {
            serde_json::Number::from(f as i64)
        }
        _ => n.clone(),
    }
}

fn write(tree: &serde_json::Value, indent: &Indent) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    match indent.unit() {
        None => serde_json::to_writer(&mut buf, tree)?,
        Some(unit) => {
            let formatter = PrettyFormatter::with_indent(unit.as_bytes());
            let mut serializer = Serializer::with_formatter(&mut buf, formatter);
            tree.serialize(&mut serializer)?;
        }
    }
    String::from_utf8(buf).map_err(|e| JsonLdError::ProcessingError {
        message: format!("serializer produced invalid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_five() {
        assert_eq!(
            escape_entities(r#"a&b<c>d"e'f"#),
            "a&amp;b&lt;c&gt;d&quot;e&apos;f"
        );
    }

    #[test]
    fn test_escape_borrows_clean_input() {
        assert!(matches!(
            escape_entities("https://schema.org"),
            Cow::Borrowed("https://schema.org")
        ));
        assert!(matches!(escape_entities(""), Cow::Borrowed("")));
    }

    #[test]
    fn test_escape_does_not_rescan_output() {
        // "&lt;" comes from '<' and must not have its '&' escaped again.
        assert_eq!(escape_entities("<&"), "&lt;&amp;");
        assert_eq!(escape_entities("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_escape_keeps_multibyte_text() {
        assert_eq!(escape_entities("café <b>"), "café &lt;b&gt;");
        assert_eq!(escape_entities("日本'語"), "日本&apos;語");
    }

    #[test]
    fn test_sanitize_drops_absent_root() {
        assert_eq!(sanitize(&Value::Null), None);
        assert_eq!(sanitize(&Value::Undefined), None);
    }

    #[test]
    fn test_integral_floats_drop_their_fraction() {
        let whole = serde_json::Number::from_f64(1.0).unwrap();
        assert_eq!(normalize_number(&whole).to_string(), "1");

        let negative_zero = serde_json::Number::from_f64(-0.0).unwrap();
        assert_eq!(normalize_number(&negative_zero).to_string(), "0");

        let fraction = serde_json::Number::from_f64(2.5).unwrap();
        assert_eq!(normalize_number(&fraction).to_string(), "2.5");

        let large = serde_json::Number::from(u64::MAX);
        assert_eq!(normalize_number(&large).to_string(), u64::MAX.to_string());
    }

    #[test]
    fn test_root_null_is_written_as_null() {
        let text = serialize(&Value::Null, &Indent::Compact).unwrap();
        assert_eq!(text, "null");
    }
}
