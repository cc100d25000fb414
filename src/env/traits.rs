//! Core environment trait and shared types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the environment returns after a reset or step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvObservation {
    /// The observation passed to [`crate::agent::BaseAgent::update_from_env`].
    pub observation: Value,
    /// The scalar reward for the transition that produced this observation.
    pub reward: f64,
    /// Whether the episode has terminated.
    pub done: bool,
    /// Arbitrary extra information from the environment.
    pub info: Value,
}

/// An episodic environment the agent is evaluated in.
pub trait Environment: Send {
    /// Start the episode and return the initial observation.
    fn reset(&mut self) -> anyhow::Result<EnvObservation>;

    /// Apply the agent's action and return the resulting observation.
    fn step(&mut self, action: &str) -> anyhow::Result<EnvObservation>;

    /// Whether the current episode has ended.
    fn is_done(&self) -> bool;
}
