//! Error types shared across the crate.
//!
//! Three families, matching how far each one is allowed to travel:
//!
//! - [`ParseError`] -- the model output could not be turned into tool calls.
//!   Expected during training; the reward evaluator converts it into a
//!   format-error reward and it never escapes an evaluation.
//! - [`ConfigError`] -- a setup mistake (e.g. an unknown parser name). Raised
//!   by constructors, before any evaluation runs.
//! - [`AgentError`] -- the agent state machine was driven out of order or fed
//!   an observation it cannot interpret.

use thiserror::Error;

/// Failure to extract tool calls from generated text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text contains none of the parser's tool-call markers.
    #[error("no tool call found in model output")]
    NoToolCalls,

    /// An opening marker was found without its closing counterpart.
    #[error("unterminated tool call block: missing `{0}`")]
    Unterminated(&'static str),

    /// A located block is not valid JSON.
    #[error("invalid tool call json: {0}")]
    InvalidJson(String),

    /// The block decoded but has no string `name` field.
    #[error("tool call is missing a `name`")]
    MissingName,

    /// The `arguments` payload did not resolve to a JSON object.
    #[error("tool call `{name}` has non-object arguments: {found}")]
    InvalidArguments { name: String, found: String },
}

/// Setup errors that must halt execution before any evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown tool parser `{name}` (available: {available})")]
    UnknownParser { name: String, available: String },
}

/// Precondition violations of the episode agent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// `get_current_state` was called before any model response was recorded.
    #[error("trajectory has no steps; call update_from_model first")]
    EmptyTrajectory,

    /// The first observation of an episode did not carry a usable prompt.
    #[error("malformed initial observation: {0}")]
    MalformedObservation(String),
}
