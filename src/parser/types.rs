//! The canonical tool-call record produced by every parser.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ParseError;

/// Upper bound on how many times a JSON-encoded string is decoded while
/// resolving an `arguments` payload.
pub const MAX_ARGUMENT_DECODE_DEPTH: usize = 8;

/// A single structured function invocation.
///
/// `arguments` is always a plain JSON object once a `ToolCall` exists; any
/// string-encoded payload has already been resolved by [`decode_arguments`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the function being called.
    pub name: String,
    /// Argument name to JSON value.
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Build a call from a decoded JSON object of the shape
    /// `{"name": ..., "arguments": ...}`. `parameters` is accepted in place
    /// of `arguments`.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ParseError::InvalidJson(format!("expected an object, got {value}")))?;

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or(ParseError::MissingName)?;

        let raw_args = obj
            .get("arguments")
            .or_else(|| obj.get("parameters"))
            .cloned()
            .unwrap_or(Value::Null);

        let arguments = decode_arguments(name, raw_args)?;
        Ok(Self::new(name, arguments))
    }

    /// The `{"name", "arguments"}` object form used for comparison and output.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "arguments": Value::Object(self.arguments.clone()),
        })
    }
}

/// Resolve a possibly string-encoded `arguments` payload to a JSON object.
///
/// While the value is a string that itself parses as JSON it is decoded
/// again, at most [`MAX_ARGUMENT_DECODE_DEPTH`] times. `null` (or a missing
/// field) yields an empty object.
pub fn decode_arguments(name: &str, raw: Value) -> Result<Map<String, Value>, ParseError> {
    let mut value = raw;
    for _ in 0..MAX_ARGUMENT_DECODE_DEPTH {
        let Value::String(s) = &value else { break };
        match serde_json::from_str::<Value>(s) {
            Ok(decoded) => value = decoded,
            Err(_) => break,
        }
    }

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ParseError::InvalidArguments {
            name: name.to_string(),
            found: truncate(&other.to_string(), 120),
        }),
    }
}

/// Unwrap a Markdown code fence, dropping the opening line whatever its
/// language tag. Unfenced text is returned trimmed.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match after_open.split_once('\n') {
        Some((_, body)) => body,
        None => after_open,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
