//! DeepSeek-R1 convention: special-token delimited calls with a fenced JSON
//! argument body.
//!
//! Each call is `<｜tool▁call▁begin｜>function<｜tool▁sep｜>NAME`, a newline, the
//! arguments as a fenced `json` code block, then `<｜tool▁call▁end｜>`. The calls
//! may be wrapped in `<｜tool▁calls▁begin｜>` / `<｜tool▁calls▁end｜>`.

use serde_json::Value;
use tracing::debug;

use super::traits::ToolParser;
use super::types::{decode_arguments, strip_code_fence, ToolCall};
use crate::error::ParseError;

const TOOL_CALLS_BEGIN: &str = "<｜tool▁calls▁begin｜>";
const TOOL_CALLS_END: &str = "<｜tool▁calls▁end｜>";
const TOOL_CALL_BEGIN: &str = "<｜tool▁call▁begin｜>";
const TOOL_CALL_END: &str = "<｜tool▁call▁end｜>";
const TOOL_SEP: &str = "<｜tool▁sep｜>";

#[derive(Debug, Clone, Copy, Default)]
pub struct R1ToolParser;

impl ToolParser for R1ToolParser {
    fn name(&self) -> &'static str {
        "r1"
    }

    fn parse(&self, text: &str) -> Result<Vec<ToolCall>, ParseError> {
        if !text.contains(TOOL_CALL_BEGIN) {
            return Err(ParseError::NoToolCalls);
        }

        // Only look inside the outer section when the model emitted one.
        let section = match text.find(TOOL_CALLS_BEGIN) {
            Some(start) => {
                let inner = &text[start + TOOL_CALLS_BEGIN.len()..];
                match inner.find(TOOL_CALLS_END) {
                    Some(end) => &inner[..end],
                    None => inner,
                }
            }
            None => text,
        };

        let mut calls = Vec::new();
        let mut rest = section;

        while let Some(begin) = rest.find(TOOL_CALL_BEGIN) {
            let after_begin = &rest[begin + TOOL_CALL_BEGIN.len()..];
            let end = after_begin
                .find(TOOL_CALL_END)
                .ok_or(ParseError::Unterminated(TOOL_CALL_END))?;

            calls.push(parse_call_block(&after_begin[..end])?);
            rest = &after_begin[end + TOOL_CALL_END.len()..];
        }

        // A call marker outside an empty outer section is not a call.
        if calls.is_empty() {
            return Err(ParseError::NoToolCalls);
        }

        debug!(count = calls.len(), "parsed r1 tool calls");
        Ok(calls)
    }

    fn tool_prompt(&self, tools_schema: &str) -> String {
        format!(
            r#"
# Tools

You may call one or more functions to assist with the user query.
<tools>
{}
</tools>

For function call returns, you should first print {TOOL_CALLS_BEGIN}

For each function call, you should return object like:

{TOOL_CALL_BEGIN}function{TOOL_SEP}<function_name>
```json
<function_arguments_in_json_format>
```{TOOL_CALL_END}

At the end of function call returns, you should print {TOOL_CALLS_END}"#,
            tools_schema.trim()
        )
    }
}

/// Parse one `function<sep>name` header plus its argument body into a call.
fn parse_call_block(block: &str) -> Result<ToolCall, ParseError> {
    let (_kind, body) = block
        .split_once(TOOL_SEP)
        .ok_or_else(|| ParseError::InvalidJson(format!("missing `{TOOL_SEP}` in tool call")))?;

    let (name_line, args_text) = body.split_once('\n').unwrap_or((body, ""));
    let name = name_line.trim();
    if name.is_empty() {
        return Err(ParseError::MissingName);
    }

    let args_text = strip_code_fence(args_text);
    let raw_args = if args_text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(args_text).map_err(|e| ParseError::InvalidJson(e.to_string()))?
    };

    let arguments = decode_arguments(name, raw_args)?;
    Ok(ToolCall::new(name, arguments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(name: &str, args: &str) -> String {
        format!("{TOOL_CALL_BEGIN}function{TOOL_SEP}{name}\n```json\n{args}\n```{TOOL_CALL_END}")
    }

    #[test]
    fn test_wrapped_calls() {
        let text = format!(
            "<think>need two lookups</think>{TOOL_CALLS_BEGIN}{}{}{TOOL_CALLS_END}",
            call("get_weather", r#"{"city": "Paris"}"#),
            call("get_time", r#"{"tz": "CET"}"#),
        );
        let calls = R1ToolParser.parse(&text).unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].name, "get_weather");
        assert_eq!(calls[0].arguments["city"], json!("Paris"));
        assert_eq!(calls[1].name, "get_time");
    }

    #[test]
    fn test_bare_call_without_outer_section() {
        let calls = R1ToolParser.parse(&call("ping", "{}")).unwrap();
        assert_eq!(calls[0].name, "ping");
        assert!(calls[0].arguments.is_empty());
    }

    #[test]
    fn test_unfenced_arguments() {
        let text = format!("{TOOL_CALL_BEGIN}function{TOOL_SEP}f\n{{\"x\": 1}}{TOOL_CALL_END}");
        let calls = R1ToolParser.parse(&text).unwrap();
        assert_eq!(calls[0].arguments["x"], json!(1));
    }

    #[test]
    fn test_no_markers() {
        assert_eq!(
            R1ToolParser.parse("just an answer").unwrap_err(),
            ParseError::NoToolCalls
        );
    }

    #[test]
    fn test_invalid_argument_json() {
        let err = R1ToolParser.parse(&call("f", "{oops")).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn test_missing_end_marker() {
        let text = format!("{TOOL_CALL_BEGIN}function{TOOL_SEP}f\n{{}}");
        assert_eq!(
            R1ToolParser.parse(&text).unwrap_err(),
            ParseError::Unterminated(TOOL_CALL_END)
        );
    }

    #[test]
    fn test_empty_section_with_stray_call_marker() {
        let text = format!(
            "{TOOL_CALLS_BEGIN}{TOOL_CALLS_END} trailing {}",
            call("ping", "{}")
        );
        assert_eq!(
            R1ToolParser.parse(&text).unwrap_err(),
            ParseError::NoToolCalls
        );
    }
}
