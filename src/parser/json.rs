//! Inline JSON convention: the answer itself is a call object or an array of
//! call objects, optionally fenced and optionally preceded by a reasoning
//! trace ending in `</think>`.

use serde_json::Value;
use tracing::debug;

use super::traits::ToolParser;
use super::types::{strip_code_fence, ToolCall};
use crate::error::ParseError;

const THINK_END: &str = "</think>";

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonToolParser;

impl ToolParser for JsonToolParser {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, text: &str) -> Result<Vec<ToolCall>, ParseError> {
        let answer = match text.rfind(THINK_END) {
            Some(idx) => &text[idx + THINK_END.len()..],
            None => text,
        };
        let body = strip_code_fence(answer);

        if !(body.starts_with('{') || body.starts_with('[')) {
            return Err(ParseError::NoToolCalls);
        }

        let value: Value =
            serde_json::from_str(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

        let calls = match &value {
            Value::Array(items) if items.is_empty() => return Err(ParseError::NoToolCalls),
            Value::Array(items) => items
                .iter()
                .map(ToolCall::from_value)
                .collect::<Result<Vec<_>, _>>()?,
            single => vec![ToolCall::from_value(single)?],
        };

        debug!(count = calls.len(), "parsed inline json tool calls");
        Ok(calls)
    }

    fn tool_prompt(&self, tools_schema: &str) -> String {
        format!(
            r#"

# Tools

You have access to the following functions:
{}

To call functions, reply with only a JSON array of call objects and nothing else:
[{{"name": <function-name>, "arguments": <args-json-object>}}]"#,
            tools_schema.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_object() {
        let calls = JsonToolParser
            .parse(r#"{"name": "get_weather", "arguments": {"city": "Paris"}}"#)
            .unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "get_weather");
        assert_eq!(calls[0].arguments["city"], json!("Paris"));
    }

    #[test]
    fn test_array_after_reasoning_and_fence() {
        let text = "<think>two calls needed</think>\n```json\n[{\"name\": \"a\", \"parameters\": {}}, {\"name\": \"b\", \"arguments\": \"{\\\"k\\\": true}\"}]\n```";
        let calls = JsonToolParser.parse(text).unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].arguments["k"], json!(true));
    }

    #[test]
    fn test_fence_with_any_language_tag() {
        for tag in ["JSON", "jsonc", "javascript", ""] {
            let text = format!("```{tag}\n{{\"name\": \"ping\"}}\n```");
            let calls = JsonToolParser.parse(&text).unwrap();
            assert_eq!(calls[0].name, "ping", "fence tag {tag:?}");
        }
    }

    #[test]
    fn test_prose_and_empty_array() {
        assert_eq!(
            JsonToolParser.parse("Sure, here you go.").unwrap_err(),
            ParseError::NoToolCalls
        );
        assert_eq!(JsonToolParser.parse("[]").unwrap_err(), ParseError::NoToolCalls);
    }

    #[test]
    fn test_truncated_json() {
        let err = JsonToolParser.parse(r#"[{"name": "a""#).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }
}
