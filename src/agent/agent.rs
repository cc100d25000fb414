//! Single-turn tool-calling agent.
//!
//! The agent makes exactly one decision per episode: it is seeded with the
//! task conversation, receives the model's response, and records that as the
//! only step of its trajectory. Correctness is judged elsewhere by parsing the
//! response, so the agent itself never interprets the text.

use serde_json::Value;
use tracing::{debug, warn};

use super::traits::BaseAgent;
use crate::error::AgentError;
use crate::trajectory::{Action, ChatMessage, Role, Step, Trajectory};

/// Marker ending a reasoning trace in assistant output.
pub const THINK_END: &str = "</think>";

/// User turn appended when the environment keeps talking after the single
/// decision. Only present to satisfy the multi-turn protocol.
pub const PLACEHOLDER_USER_TURN: &str = "Hi!";

/// Where the agent is within its episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentPhase {
    /// No model response recorded yet.
    Fresh,
    /// At least one step exists and awaits its reward.
    AwaitingReward,
}

/// Agent that records one model response per episode for AST-style tool-call
/// scoring.
#[derive(Debug, Clone)]
pub struct ToolAstAgent {
    trajectory: Trajectory,
    messages: Vec<ChatMessage>,
    /// When false, earlier assistant turns lose their reasoning trace in
    /// [`BaseAgent::chat_completions`].
    accumulate_thinking: bool,
}

impl ToolAstAgent {
    pub fn new(accumulate_thinking: bool) -> Self {
        Self {
            trajectory: Trajectory::new(),
            messages: Vec::new(),
            accumulate_thinking,
        }
    }

    pub fn phase(&self) -> AgentPhase {
        if self.trajectory.is_empty() {
            AgentPhase::Fresh
        } else {
            AgentPhase::AwaitingReward
        }
    }

    pub fn accumulate_thinking(&self) -> bool {
        self.accumulate_thinking
    }
}

impl Default for ToolAstAgent {
    fn default() -> Self {
        Self::new(true)
    }
}

impl BaseAgent for ToolAstAgent {
    fn update_from_env(
        &mut self,
        observation: &Value,
        reward: f64,
        done: bool,
        info: &Value,
    ) -> Result<(), AgentError> {
        if self.trajectory.is_empty() {
            self.messages = initial_messages(observation)?;
            debug!(messages = self.messages.len(), "seeded conversation from observation");
            return Ok(());
        }

        self.trajectory.record_outcome(reward, done);
        debug!(reward, done, info = %info, "environment responded after decision");
        self.messages.push(ChatMessage::user(PLACEHOLDER_USER_TURN));
        Ok(())
    }

    fn update_from_model(&mut self, response: &str) -> Action {
        self.messages.push(ChatMessage::assistant(response));

        let step = Step {
            step_index: self.trajectory.len(),
            chat_completions: self.chat_completions(),
            model_response: response.to_string(),
            action: response.to_string(),
            reward: 0.0,
            done: false,
        };
        self.trajectory.push(step);

        Action {
            action: response.to_string(),
        }
    }

    fn reset(&mut self) -> Trajectory {
        self.messages.clear();
        std::mem::take(&mut self.trajectory)
    }

    fn chat_completions(&self) -> Vec<ChatMessage> {
        let mut messages = self.messages.clone();
        if self.accumulate_thinking {
            return messages;
        }

        // Only the final message of the history keeps its reasoning.
        let last = messages.len();
        for (idx, msg) in messages.iter_mut().enumerate() {
            if msg.role != Role::Assistant || idx + 1 == last {
                continue;
            }
            if let Some((_, after)) = msg.content.split_once(THINK_END) {
                msg.content = after.to_string();
            }
        }
        messages
    }

    fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    fn get_current_state(&self) -> Result<&Step, AgentError> {
        self.trajectory.last_step().ok_or(AgentError::EmptyTrajectory)
    }
}

/// Decode the conversation carried in the first observation's `prompt`.
fn initial_messages(observation: &Value) -> Result<Vec<ChatMessage>, AgentError> {
    let prompt = observation
        .as_object()
        .ok_or_else(|| AgentError::MalformedObservation("observation is not an object".into()))?
        .get("prompt")
        .ok_or_else(|| AgentError::MalformedObservation("observation has no `prompt`".into()))?;

    let parsed = match prompt {
        Value::String(s) => serde_json::from_str::<Vec<ChatMessage>>(s),
        Value::Array(_) => serde_json::from_value::<Vec<ChatMessage>>(prompt.clone()),
        other => {
            return Err(AgentError::MalformedObservation(format!(
                "`prompt` must be a message array, got {other}"
            )))
        }
    };

    parsed.map_err(|e| {
        warn!(error = %e, "could not decode prompt conversation");
        AgentError::MalformedObservation(format!("invalid prompt conversation: {e}"))
    })
}
