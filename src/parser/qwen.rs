//! Qwen / Hermes convention: one JSON object per `<tool_call>` block.
//!
//! ```text
//! <tool_call>
//! {"name": "get_weather", "arguments": {"city": "Paris"}}
//! </tool_call>
//! ```

use serde_json::Value;
use tracing::debug;

use super::traits::ToolParser;
use super::types::ToolCall;
use crate::error::ParseError;

const TOOL_CALL_BEGIN: &str = "<tool_call>";
const TOOL_CALL_END: &str = "</tool_call>";

#[derive(Debug, Clone, Copy, Default)]
pub struct QwenToolParser;

impl ToolParser for QwenToolParser {
    fn name(&self) -> &'static str {
        "qwen"
    }

    fn parse(&self, text: &str) -> Result<Vec<ToolCall>, ParseError> {
        if !text.contains(TOOL_CALL_BEGIN) {
            return Err(ParseError::NoToolCalls);
        }

        let mut calls = Vec::new();
        let mut rest = text;

        while let Some(begin) = rest.find(TOOL_CALL_BEGIN) {
            let after_begin = &rest[begin + TOOL_CALL_BEGIN.len()..];
            let end = after_begin
                .find(TOOL_CALL_END)
                .ok_or(ParseError::Unterminated(TOOL_CALL_END))?;

            let block = after_begin[..end].trim();
            let value: Value = serde_json::from_str(block)
                .map_err(|e| ParseError::InvalidJson(e.to_string()))?;
            calls.push(ToolCall::from_value(&value)?);

            rest = &after_begin[end + TOOL_CALL_END.len()..];
        }

        debug!(count = calls.len(), "parsed qwen tool calls");
        Ok(calls)
    }

    fn tool_prompt(&self, tools_schema: &str) -> String {
        format!(
            r#"

# Tools

You may call one or more functions to assist with the user query.

You are provided with function signatures within <tools></tools> XML tags:
<tools>
{}
</tools>

For each function call, return a json object with function name and arguments within <tool_call></tool_call> XML tags:
<tool_call>
{{"name": <function-name>, "arguments": <args-json-object>}}
</tool_call>"#,
            tools_schema.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_call() {
        let text = "I'll check.\n<tool_call>\n{\"name\": \"get_weather\", \"arguments\": {\"city\": \"Paris\"}}\n</tool_call>";
        let calls = QwenToolParser.parse(text).unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "get_weather");
        assert_eq!(calls[0].arguments["city"], json!("Paris"));
    }

    #[test]
    fn test_multiple_calls_keep_order() {
        let text = concat!(
            "<tool_call>{\"name\": \"a\", \"arguments\": {}}</tool_call>\n",
            "<tool_call>{\"name\": \"b\", \"arguments\": {\"x\": [1, 2]}}</tool_call>"
        );
        let calls = QwenToolParser.parse(text).unwrap();
        let names: Vec<_> = calls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(calls[1].arguments["x"], json!([1, 2]));
    }

    #[test]
    fn test_double_encoded_arguments() {
        let text = r#"<tool_call>{"name": "get_weather", "arguments": "{\"city\": \"Paris\"}"}</tool_call>"#;
        let calls = QwenToolParser.parse(text).unwrap();
        assert_eq!(calls[0].arguments["city"], json!("Paris"));
    }

    #[test]
    fn test_prose_without_markers() {
        let err = QwenToolParser.parse("The weather in Paris is mild.").unwrap_err();
        assert_eq!(err, ParseError::NoToolCalls);
    }

    #[test]
    fn test_invalid_json_block() {
        let err = QwenToolParser
            .parse("<tool_call>{name: get_weather}</tool_call>")
            .unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn test_unterminated_block() {
        let err = QwenToolParser
            .parse("<tool_call>{\"name\": \"a\", \"arguments\": {}}")
            .unwrap_err();
        assert_eq!(err, ParseError::Unterminated(TOOL_CALL_END));
    }

    #[test]
    fn test_tool_prompt_embeds_schema() {
        let schema = r#"[{"name": "get_weather", "parameters": {"type": "object"}}]"#;
        let prompt = QwenToolParser.tool_prompt(schema);
        assert!(prompt.contains("<tools>\n[{\"name\": \"get_weather\""));
        assert!(prompt.contains("<tool_call></tool_call>"));
    }
}
