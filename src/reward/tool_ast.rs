//! Reward function for tool-calling tasks.
//!
//! Extracts calls from the model's response with a [`ToolParser`], decodes the
//! task's ground truth, and compares the two as multisets. Every failure on
//! the way is turned into a [`Verdict`]; nothing escapes as an error.

use std::sync::Arc;

use tracing::{debug, warn};

use super::compare::diff_tool_calls;
use super::diagnostics::{MismatchObserver, TracingObserver};
use super::types::{RewardOutput, TaskInfo, Verdict};
use crate::config::RewardConfig;
use crate::error::ConfigError;
use crate::parser::{get_tool_parser, ToolParser};

/// Anything that can score a model response for a task.
pub trait RewardFn: Send + Sync {
    fn evaluate(&self, task: &TaskInfo, action: &str) -> RewardOutput;
}

/// Scores a response by exact (order-insensitive) tool-call matching.
pub struct ToolCallingAstReward {
    config: RewardConfig,
    parser: Box<dyn ToolParser>,
    observer: Arc<dyn MismatchObserver>,
}

impl ToolCallingAstReward {
    /// Build an evaluator using the built-in parser registered as
    /// `parser_name`. Unknown names fail here, not at evaluation time.
    pub fn new(config: RewardConfig, parser_name: &str) -> Result<Self, ConfigError> {
        Ok(Self::with_parser(config, get_tool_parser(parser_name)?))
    }

    /// Build an evaluator around an already constructed parser.
    pub fn with_parser(config: RewardConfig, parser: Box<dyn ToolParser>) -> Self {
        Self {
            config,
            parser,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the mismatch observer.
    pub fn with_observer(mut self, observer: Arc<dyn MismatchObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn parser_name(&self) -> &'static str {
        self.parser.name()
    }

    /// Classify a response without mapping it to a reward.
    pub fn judge(&self, task: &TaskInfo, response: &str) -> Verdict {
        if response.is_empty() {
            debug!("empty model response");
            return Verdict::FormatError;
        }

        let generated = match self.parser.parse(response) {
            Ok(calls) => calls,
            Err(e) => {
                debug!(parser = self.parser.name(), error = %e, "failed to extract tool calls");
                return Verdict::FormatError;
            }
        };

        let expected = match task.ground_truth_calls() {
            None => return Verdict::UnknownError,
            Some(Ok(calls)) => calls,
            Some(Err(e)) => {
                warn!(
                    uid = task.uid.as_deref().unwrap_or("-"),
                    error = %e,
                    "unusable ground truth"
                );
                return Verdict::UnknownError;
            }
        };

        match diff_tool_calls(&generated, &expected) {
            None => Verdict::Correct,
            Some(mismatch) => {
                self.observer.on_mismatch(task, &mismatch);
                Verdict::Incorrect
            }
        }
    }
}

impl RewardFn for ToolCallingAstReward {
    fn evaluate(&self, task: &TaskInfo, action: &str) -> RewardOutput {
        self.config.reward_for(self.judge(task, action))
    }
}
