//! Agent module: the single-turn tool-calling agent.
//!
//! [`ToolAstAgent`] owns the message history and trajectory of one episode and
//! implements the generic [`BaseAgent`] protocol used by environment drivers.

pub mod agent;
pub mod traits;

pub use agent::{AgentPhase, ToolAstAgent, PLACEHOLDER_USER_TURN, THINK_END};
pub use traits::BaseAgent;
