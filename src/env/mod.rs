//! Environment abstraction and the single-turn tool-calling environment.
//!
//! Every environment implements the [`Environment`] trait so drivers can run
//! the agent against it uniformly. [`single_turn::SingleTurnEnvironment`]
//! presents one task and scores one response with a reward function.

pub mod single_turn;
pub mod traits;

pub use single_turn::SingleTurnEnvironment;
pub use traits::{EnvObservation, Environment};
