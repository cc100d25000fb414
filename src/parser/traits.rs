//! The extraction protocol every model-family convention implements.

use super::types::ToolCall;
use crate::error::ParseError;

/// Turns raw generated text into tool calls for one textual convention, and
/// describes available tools to the model in that same convention.
///
/// Implementations are stateless and shared across evaluation workers.
pub trait ToolParser: Send + Sync {
    /// Registry identifier of this convention (e.g. `"qwen"`).
    fn name(&self) -> &'static str;

    /// Extract every tool call in `text`, in order of appearance.
    ///
    /// Text without any recognizable marker is a [`ParseError::NoToolCalls`];
    /// callers treat every error as an ordinary, recoverable outcome.
    fn parse(&self, text: &str) -> Result<Vec<ToolCall>, ParseError>;

    /// Render the block to place in the system prompt so the model knows
    /// which tools exist. `tools_schema` is a JSON array of tool schemas and
    /// is embedded as given.
    fn tool_prompt(&self, tools_schema: &str) -> String;
}
