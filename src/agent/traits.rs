//! The agent side of the generic agent/environment protocol.

use serde_json::Value;

use crate::error::AgentError;
use crate::trajectory::{Action, ChatMessage, Step, Trajectory};

/// An agent driven by an episodic environment loop.
///
/// The driver alternates `update_from_env` (observation in) and
/// `update_from_model` (model text in, action out), then scores the action.
/// One agent instance serves one episode at a time.
pub trait BaseAgent {
    /// Feed the agent the environment's latest observation along with the
    /// reward and termination flag for its previous action.
    fn update_from_env(
        &mut self,
        observation: &Value,
        reward: f64,
        done: bool,
        info: &Value,
    ) -> Result<(), AgentError>;

    /// Record the model's response and return the action to execute.
    fn update_from_model(&mut self, response: &str) -> Action;

    /// Start a new episode, handing back the trajectory of the finished one.
    fn reset(&mut self) -> Trajectory;

    /// Message history to send to the model.
    fn chat_completions(&self) -> Vec<ChatMessage>;

    /// The trajectory of the current episode.
    fn trajectory(&self) -> &Trajectory;

    /// The most recent step. Fails before the first model response.
    fn get_current_state(&self) -> Result<&Step, AgentError>;
}
