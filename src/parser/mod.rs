//! Tool-call extraction.
//!
//! This module provides:
//! - [`types::ToolCall`] -- the canonical `{name, arguments}` record, plus the
//!   bounded decoder for string-encoded argument payloads.
//! - [`traits::ToolParser`] -- the extraction protocol.
//! - One parser per model-family convention: [`qwen`], [`r1`], [`json`].
//! - [`ParserRegistry`] -- an open map from identifier to parser factory, so
//!   new conventions are added without touching calling code.

pub mod json;
pub mod qwen;
pub mod r1;
pub mod traits;
pub mod types;

use std::collections::BTreeMap;

use crate::error::ConfigError;

pub use json::JsonToolParser;
pub use qwen::QwenToolParser;
pub use r1::R1ToolParser;
pub use traits::ToolParser;
pub use types::{decode_arguments, ToolCall, MAX_ARGUMENT_DECODE_DEPTH};

/// Constructor stored in the registry.
pub type ParserFactory = fn() -> Box<dyn ToolParser>;

/// Name-to-factory lookup for tool parsers.
#[derive(Clone)]
pub struct ParserRegistry {
    factories: BTreeMap<String, ParserFactory>,
}

impl ParserRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A registry holding every parser shipped with the crate.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("qwen", || Box::new(QwenToolParser));
        registry.register("r1", || Box::new(R1ToolParser));
        registry.register("json", || Box::new(JsonToolParser));
        registry
    }

    /// Register (or replace) the factory for `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: ParserFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Instantiate the parser registered under `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn ToolParser>, ConfigError> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(ConfigError::UnknownParser {
                name: name.to_string(),
                available: self.names().join(", "),
            }),
        }
    }

    /// Registered identifiers, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Look up a built-in parser by name.
pub fn get_tool_parser(name: &str) -> Result<Box<dyn ToolParser>, ConfigError> {
    ParserRegistry::with_builtins().create(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    struct EchoParser;

    impl ToolParser for EchoParser {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn parse(&self, text: &str) -> Result<Vec<ToolCall>, ParseError> {
            Ok(vec![ToolCall::new(text, Default::default())])
        }

        fn tool_prompt(&self, tools_schema: &str) -> String {
            tools_schema.to_string()
        }
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(ParserRegistry::with_builtins().names(), ["json", "qwen", "r1"]);
    }

    #[test]
    fn test_lookup_returns_matching_variant() {
        for name in ["qwen", "r1", "json"] {
            assert_eq!(get_tool_parser(name).unwrap().name(), name);
        }
    }

    #[test]
    fn test_unknown_parser_is_config_error() {
        let err = get_tool_parser("llama").err().unwrap();
        match err {
            ConfigError::UnknownParser { name, available } => {
                assert_eq!(name, "llama");
                assert!(available.contains("qwen"));
            }
        }
    }

    #[test]
    fn test_register_custom_parser() {
        let mut registry = ParserRegistry::with_builtins();
        registry.register("echo", || Box::new(EchoParser));
        let parser = registry.create("echo").unwrap();
        assert_eq!(parser.parse("ping").unwrap()[0].name, "ping");
    }

    #[test]
    fn test_tool_prompt_never_fails_for_any_variant() {
        let registry = ParserRegistry::with_builtins();
        let schema = r#"[{"name": "get_weather", "description": "Weather lookup", "parameters": {"type": "object", "properties": {"city": {"type": "string"}}}}]"#;
        for name in registry.names() {
            let parser = registry.create(name).unwrap();
            let prompt = parser.tool_prompt(schema);
            assert!(prompt.contains("get_weather"), "{name} prompt lost the schema");
            // Rendering is descriptive only; it never has to parse back.
            let _ = parser.parse(&prompt);
            let _ = parser.tool_prompt("not even json");
        }
    }

    #[test]
    fn test_parse_never_returns_an_empty_call_set() {
        let registry = ParserRegistry::with_builtins();
        let inputs = [
            "",
            "no calls here",
            "<tool_call></tool_call>",
            "<tool_call>[]</tool_call>",
            "<｜tool▁calls▁begin｜><｜tool▁calls▁end｜>",
            "<｜tool▁calls▁begin｜><｜tool▁calls▁end｜><｜tool▁call▁begin｜>",
            "[]",
            "```json\n[]\n```",
            "<think>[{\"name\": \"a\"}]</think>",
        ];
        for name in registry.names() {
            let parser = registry.create(name).unwrap();
            for input in inputs {
                if let Ok(calls) = parser.parse(input) {
                    assert!(!calls.is_empty(), "{name} returned no calls for {input:?}");
                }
            }
        }
    }
}
