//! Trajectory and message types recorded by the episode agent.
//!
//! - [`types::ChatMessage`] / [`types::Role`] -- role-tagged conversation turns.
//! - [`types::Step`] / [`types::Trajectory`] -- what the training loop consumes.
//! - [`types::Action`] -- the agent's output handed to the environment.

pub mod types;

pub use types::{Action, ChatMessage, Role, Step, Trajectory};
