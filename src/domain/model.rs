use crate::utils::error::{JsonLdError, Result};
use crate::utils::validation::validate_whitespace;
use indexmap::IndexMap;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Largest indentation unit honoured by the writer, matching `JSON.stringify`.
pub const MAX_INDENT: usize = 10;

/// A JSON-LD value tree.
///
/// `Undefined` marks "no value was provided". It is dropped from objects like
/// `Null`, and written as `null` inside arrays so positions stay aligned.
/// `NonFinite` holds NaN or an infinity: a number with no JSON literal, so it
/// is written as `null` but, unlike `Null`, keeps its object key.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Undefined,
    Bool(bool),
    Number(serde_json::Number),
    NonFinite(f64),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Converts any serde-serializable Rust value into a `Value` tree.
    ///
    /// Rust data that has no place in the JSON value union (a map keyed by
    /// anything other than strings, or a `Serialize` impl that errors) is
    /// rejected with [`JsonLdError::UnsupportedValueType`].
    pub fn from_serialize<T: Serialize + ?Sized>(item: &T) -> Result<Self> {
        serde_json::to_value(item)
            .map(Value::from)
            .map_err(|e| JsonLdError::UnsupportedValueType {
                detail: e.to_string(),
            })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) | Value::NonFinite(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(Value::NonFinite(n), Value::Number)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Pretty-printing directive for the serializer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Indent {
    #[default]
    Compact,
    Spaces(usize),
    Text(IndentText),
}

/// A non-empty, whitespace-only indentation unit of at most [`MAX_INDENT`]
/// characters. Only [`Indent::text`] can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentText(String);

impl IndentText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Indent {
    pub fn spaces(width: usize) -> Self {
        match width {
            0 => Indent::Compact,
            n => Indent::Spaces(n.min(MAX_INDENT)),
        }
    }

    pub fn text(unit: &str) -> Result<Self> {
        validate_whitespace("indent", unit)?;
        let unit: String = unit.chars().take(MAX_INDENT).collect();
        if unit.is_empty() {
            Ok(Indent::Compact)
        } else {
            Ok(Indent::Text(IndentText(unit)))
        }
    }

    /// The string written once per nesting level, or `None` for compact output.
    pub fn unit(&self) -> Option<Cow<'_, str>> {
        match self {
            Indent::Compact | Indent::Spaces(0) => None,
            Indent::Spaces(n) => Some(Cow::Owned(" ".repeat((*n).min(MAX_INDENT)))),
            Indent::Text(t) => Some(Cow::Borrowed(t.as_str())),
        }
    }
}

impl FromStr for Indent {
    type Err = JsonLdError;

    fn from_str(s: &str) -> Result<Self> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            // Digit strings too long for usize are clamped like any other wide value.
            let width = s.parse::<usize>().unwrap_or(MAX_INDENT);
            return Ok(Indent::spaces(width));
        }
        Indent::text(s)
    }
}

/// Output of the safe serializer.
///
/// No string content inside it holds a raw `&`, `<`, `>`, `"` or `'`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SerializedText(String);

impl SerializedText {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SerializedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SerializedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for SerializedText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<SerializedText> for String {
    fn from(text: SerializedText) -> Self {
        text.0
    }
}

/// How the CLI presents a serialized item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Bare serialized JSON-LD.
    #[default]
    Json,
    /// A complete `<script type="application/ld+json">` element.
    Script,
    /// A `{"type", "innerHTML"}` object for declarative head managers.
    Helmet,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 3] = ["json", "script", "helmet"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(OutputFormat::Json),
            "script" => Some(OutputFormat::Script),
            "helmet" => Some(OutputFormat::Helmet),
            _ => None,
        }
    }
}
