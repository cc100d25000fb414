//! Core trajectory data types consumed by the training loop.
//!
//! A [`Trajectory`] is the record of one episode: an append-only list of
//! [`Step`]s, each holding the exact message history the model saw when it
//! produced its response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A single role-tagged message in a conversation.
///
/// Keys other than `role` and `content` (`name`, `tool_calls`, ...) are kept
/// in `extra` and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    /// Absent when the upstream record had no (or a null) content.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            extra: Map::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// What the agent hands back to the environment driver after a model turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub action: String,
}

// ---------------------------------------------------------------------------
// Single step
// ---------------------------------------------------------------------------

/// One decision point within a trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Zero-based index of this step within the trajectory.
    pub step_index: usize,
    /// Message history presented to the model, ending with its response.
    pub chat_completions: Vec<ChatMessage>,
    /// Raw text the model produced.
    pub model_response: String,
    /// The action forwarded to the environment.
    pub action: String,
    /// Reward assigned by the environment for this step (0 until known).
    pub reward: f64,
    /// Whether the environment ended the episode after this step.
    pub done: bool,
}

// ---------------------------------------------------------------------------
// Full trajectory
// ---------------------------------------------------------------------------

/// The record of one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Ordered, append-only sequence of steps.
    pub steps: Vec<Step>,
    /// Total reward accumulated over the episode.
    pub reward: f64,
}

impl Trajectory {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            steps: Vec::new(),
            reward: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The most recent step, if any.
    pub fn last_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Attach the environment's verdict to the latest step. A no-op on an
    /// empty trajectory.
    pub(crate) fn record_outcome(&mut self, reward: f64, done: bool) {
        if let Some(step) = self.steps.last_mut() {
            step.reward = reward;
            step.done = done;
            self.reward = self.steps.iter().map(|s| s.reward).sum();
        }
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(index: usize) -> Step {
        Step {
            step_index: index,
            chat_completions: vec![ChatMessage::user("q"), ChatMessage::assistant("a")],
            model_response: "a".into(),
            action: "a".into(),
            reward: 0.0,
            done: false,
        }
    }

    #[test]
    fn test_new_trajectories_are_distinct_and_empty() {
        let a = Trajectory::new();
        let b = Trajectory::new();
        assert_ne!(a.id, b.id);
        assert!(a.is_empty());
        assert!(a.last_step().is_none());
    }

    #[test]
    fn test_record_outcome_updates_last_step_and_total() {
        let mut t = Trajectory::new();
        t.record_outcome(1.0, true);
        assert_eq!(t.reward, 0.0);

        t.push(step(0));
        t.record_outcome(1.0, true);
        let last = t.last_step().unwrap();
        assert_eq!(last.reward, 1.0);
        assert!(last.done);
        assert_eq!(t.reward, 1.0);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
        let json = serde_json::to_string(&ChatMessage::system("be brief")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"be brief"}"#);
    }

    #[test]
    fn test_extra_keys_round_trip() {
        let raw = serde_json::json!({
            "role": "assistant",
            "tool_calls": [{"name": "f", "arguments": {}}],
            "name": "helper"
        });
        let msg: ChatMessage = serde_json::from_value(raw).unwrap();
        assert_eq!(msg.content, "");
        assert_eq!(msg.extra["name"], "helper");

        let back = serde_json::to_value(&msg).unwrap();
        assert_eq!(back["tool_calls"][0]["name"], "f");
        assert_eq!(back["name"], "helper");

        let msg: ChatMessage =
            serde_json::from_value(serde_json::json!({"role": "user", "content": null})).unwrap();
        assert_eq!(msg, ChatMessage::user(""));
    }
}
