//! Inputs and outputs of reward evaluation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::parser::ToolCall;

/// The scalar reward and correctness flag for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardOutput {
    pub reward: f64,
    pub is_correct: bool,
}

/// The four possible outcomes of scoring a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Generated calls match the ground truth.
    Correct,
    /// Calls were extracted but differ from the ground truth.
    Incorrect,
    /// The response was empty or no calls could be extracted.
    FormatError,
    /// The task carries no usable ground truth.
    UnknownError,
}

/// Per-example task record supplied by the dataset layer.
///
/// Only `ground_truth` is interpreted here; the remaining fields are carried
/// for provenance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInfo {
    /// JSON string of an array of `{name, arguments}` objects (an already
    /// decoded array is accepted too).
    #[serde(default)]
    pub ground_truth: Option<Value>,
    #[serde(default)]
    pub data_source: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub index: Option<u64>,
    /// Serialized conversation handed to the agent as its first observation.
    #[serde(default)]
    pub prompt: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskInfo {
    /// A task with the given ground-truth JSON string.
    pub fn with_ground_truth(ground_truth: impl Into<String>) -> Self {
        Self {
            ground_truth: Some(Value::String(ground_truth.into())),
            ..Self::default()
        }
    }

    /// Decode the stored ground truth.
    ///
    /// `None` when the field is absent or `null`; `Some(Err(_))` when it is
    /// present but not an array of tool calls.
    pub fn ground_truth_calls(&self) -> Option<Result<Vec<ToolCall>, String>> {
        let raw = match self.ground_truth.as_ref()? {
            Value::Null => return None,
            Value::String(s) => match serde_json::from_str::<Value>(s) {
                Ok(v) => v,
                Err(e) => return Some(Err(format!("ground truth is not valid json: {e}"))),
            },
            other => other.clone(),
        };

        let Value::Array(items) = raw else {
            return Some(Err("ground truth is not a json array".to_string()));
        };

        Some(
            items
                .iter()
                .map(|item| ToolCall::from_value(item).map_err(|e| e.to_string()))
                .collect(),
        )
    }
}
