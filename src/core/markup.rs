//! Wrappers that place a serialized item into a page.

use crate::core::serializer::SafeSerializer;
use crate::domain::model::{Indent, Value};
use crate::utils::error::{JsonLdError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const JSON_LD_MIME_TYPE: &str = "application/ld+json";
pub const SCHEMA_ORG_CONTEXT: &str = "https://schema.org";
pub const CONTEXT_KEY: &str = "@context";

/// Script element props for head managers that inject tags declaratively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadScriptProps {
    #[serde(rename = "type")]
    pub script_type: String,
    #[serde(rename = "innerHTML")]
    pub inner_html: String,
}

/// A JSON-LD item rendered as an inline `<script>` element.
///
/// ```
/// use jsonld_safe::{JsonLd, Value};
///
/// let item: Value = [
///     ("@context", Value::from("https://schema.org")),
///     ("@type", Value::from("Person")),
///     ("name", Value::from("Grace Hopper")),
/// ]
/// .into_iter()
/// .collect();
///
/// let html = JsonLd::new(item).render().unwrap();
/// assert_eq!(
///     html,
///     r#"<script type="application/ld+json">{"@context":"https://schema.org","@type":"Person","name":"Grace Hopper"}</script>"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct JsonLd {
    item: Value,
    indent: Indent,
}

impl JsonLd {
    pub fn new(item: Value) -> Self {
        Self {
            item,
            indent: Indent::Compact,
        }
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn item(&self) -> &Value {
        &self.item
    }

    pub fn render(&self) -> Result<String> {
        let payload = SafeSerializer::new()
            .with_indent(self.indent.clone())
            .serialize(&self.item)?;
        debug!(bytes = payload.len(), "rendering JSON-LD script element");
        Ok(format!(
            r#"<script type="{}">{}</script>"#,
            JSON_LD_MIME_TYPE, payload
        ))
    }
}

pub fn head_script_props(item: &Value, indent: &Indent) -> Result<HeadScriptProps> {
    let payload = SafeSerializer::new()
        .with_indent(indent.clone())
        .serialize(item)?;
    Ok(HeadScriptProps {
        script_type: JSON_LD_MIME_TYPE.to_string(),
        inner_html: payload.into_string(),
    })
}

/// Puts `@context` first in `item` unless the item already names one.
pub fn with_context(item: Value, context: &str) -> Result<Value> {
    match item {
        Value::Object(mut map) => {
            if map.get(CONTEXT_KEY).is_some_and(|existing| !existing.is_absent()) {
                return Ok(Value::Object(map));
            }
            map.shift_remove(CONTEXT_KEY);
            map.shift_insert(0, CONTEXT_KEY.to_string(), Value::from(context));
            Ok(Value::Object(map))
        }
        other => Err(JsonLdError::ProcessingError {
            message: format!("a JSON-LD item must be an object, got {}", other.kind()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> Value {
        Value::from(serde_json::json!({"@type": "Person", "name": "Grace Hopper"}))
    }

    #[test]
    fn test_with_context_inserts_first() {
        let item = with_context(person(), SCHEMA_ORG_CONTEXT).unwrap();
        let keys: Vec<&str> = item.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["@context", "@type", "name"]);
    }

    #[test]
    fn test_with_context_keeps_existing() {
        let item = Value::from(serde_json::json!({"@type": "Thing", "@context": "https://example.org"}));
        let item = with_context(item, SCHEMA_ORG_CONTEXT).unwrap();
        assert_eq!(item.get(CONTEXT_KEY), Some(&Value::from("https://example.org")));
    }

    #[test]
    fn test_with_context_replaces_null_context() {
        let item = Value::from(serde_json::json!({"@type": "Thing", "@context": null}));
        let item = with_context(item, SCHEMA_ORG_CONTEXT).unwrap();
        assert_eq!(item.get(CONTEXT_KEY), Some(&Value::from(SCHEMA_ORG_CONTEXT)));
    }

    #[test]
    fn test_with_context_rejects_non_objects() {
        let err = with_context(Value::from(vec!["a", "b"]), SCHEMA_ORG_CONTEXT).unwrap_err();
        assert!(matches!(err, JsonLdError::ProcessingError { .. }));
    }

    #[test]
    fn test_head_script_props_field_names() {
        let props = head_script_props(&person(), &Indent::Compact).unwrap();
        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["type"], "application/ld+json");
        assert_eq!(json["innerHTML"], r#"{"@type":"Person","name":"Grace Hopper"}"#);
    }
}
