//! Single-turn environment: present the task once, score the one response.

use std::sync::Arc;

use anyhow::Result;
use serde_json::{json, Value};
use tracing::debug;

use super::traits::{EnvObservation, Environment};
use crate::reward::{RewardFn, TaskInfo};

/// Environment whose episode is a single decision scored by a [`RewardFn`].
///
/// `reset` returns the task record itself as the observation, so its `prompt`
/// field reaches the agent unchanged. The first `step` is always terminal.
pub struct SingleTurnEnvironment {
    task: TaskInfo,
    reward_fn: Arc<dyn RewardFn>,
    done: bool,
}

impl SingleTurnEnvironment {
    pub fn new(task: TaskInfo, reward_fn: Arc<dyn RewardFn>) -> Self {
        Self {
            task,
            reward_fn,
            done: false,
        }
    }

    pub fn task(&self) -> &TaskInfo {
        &self.task
    }
}

impl Environment for SingleTurnEnvironment {
    fn reset(&mut self) -> Result<EnvObservation> {
        self.done = false;
        Ok(EnvObservation {
            observation: serde_json::to_value(&self.task)?,
            reward: 0.0,
            done: false,
            info: Value::Null,
        })
    }

    fn step(&mut self, action: &str) -> Result<EnvObservation> {
        if self.done {
            anyhow::bail!("cannot step in a terminated episode");
        }

        let output = self.reward_fn.evaluate(&self.task, action);
        self.done = true;

        debug!(
            uid = self.task.uid.as_deref().unwrap_or("-"),
            reward = output.reward,
            is_correct = output.is_correct,
            "single-turn episode scored"
        );

        Ok(EnvObservation {
            observation: json!({}),
            reward: output.reward,
            done: true,
            info: json!({ "is_correct": output.is_correct }),
        })
    }

    fn is_done(&self) -> bool {
        self.done
    }
}
