//! toolast: tool-call scoring core for single-turn tool-calling RL.
//!
//! Extracts structured tool calls from model text across several model-family
//! conventions, compares them order-insensitively against a task's ground
//! truth, maps the outcome to a scalar reward, and tracks the single-step
//! episode state the training loop consumes.

pub mod agent;
pub mod config;
pub mod env;
pub mod error;
pub mod parser;
pub mod reward;
pub mod trajectory;
