//! Reward evaluation for tool-calling outputs.
//!
//! - [`types`] -- [`TaskInfo`], [`RewardOutput`], [`Verdict`].
//! - [`compare`] -- canonicalization and multiset comparison of call sets.
//! - [`diagnostics`] -- the observer that receives mismatch reports.
//! - [`tool_ast`] -- the [`RewardFn`] trait and [`ToolCallingAstReward`].

pub mod compare;
pub mod diagnostics;
pub mod tool_ast;
pub mod types;

pub use compare::{canonical_call, canonical_json, compare_tool_calls, diff_tool_calls, CallSetMismatch};
pub use diagnostics::{MismatchObserver, SilentObserver, TracingObserver};
pub use tool_ast::{RewardFn, ToolCallingAstReward};
pub use types::{RewardOutput, TaskInfo, Verdict};
