use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::reward::types::{RewardOutput, Verdict};

/// Complete configuration for scoring and the episode agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolAstConfig {
    pub reward: RewardConfig,
    /// Identifier of the tool parser to use (default: "qwen").
    pub parser_name: String,
    /// Keep earlier reasoning traces in the history sent back to the model
    /// (default: true).
    pub accumulate_thinking: bool,
}

/// Scalar reward for each evaluation outcome.
///
/// Built once per run and shared read-only by every evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Reward when the generated calls match (default: 1.0).
    pub correct_reward: f64,
    /// Reward when calls were extracted but differ (default: 0.0).
    pub incorrect_reward: f64,
    /// Reward for empty output or unparseable calls (default: 0.0).
    pub format_error_reward: f64,
    /// Reward when the task has no ground truth (default: 0.0).
    pub unk_error_reward: f64,
}

impl RewardConfig {
    /// Map an outcome to its configured reward.
    pub fn reward_for(&self, verdict: Verdict) -> RewardOutput {
        let reward = match verdict {
            Verdict::Correct => self.correct_reward,
            Verdict::Incorrect => self.incorrect_reward,
            Verdict::FormatError => self.format_error_reward,
            Verdict::UnknownError => self.unk_error_reward,
        };
        RewardOutput {
            reward,
            is_correct: verdict == Verdict::Correct,
        }
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            correct_reward: 1.0,
            incorrect_reward: 0.0,
            format_error_reward: 0.0,
            unk_error_reward: 0.0,
        }
    }
}

impl Default for ToolAstConfig {
    fn default() -> Self {
        Self {
            reward: RewardConfig::default(),
            parser_name: "qwen".into(),
            accumulate_thinking: true,
        }
    }
}

impl ToolAstConfig {
    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ToolAstConfig =
            serde_json::from_str(r#"{"reward": {"format_error_reward": -1.0}, "parser_name": "r1"}"#)
                .unwrap();
        assert_eq!(config.parser_name, "r1");
        assert!(config.accumulate_thinking);
        assert_eq!(config.reward.format_error_reward, -1.0);
        assert_eq!(config.reward.correct_reward, 1.0);
    }

    #[test]
    fn test_reward_for_each_verdict() {
        let config = RewardConfig {
            correct_reward: 1.0,
            incorrect_reward: -0.5,
            format_error_reward: -1.0,
            unk_error_reward: 0.25,
        };
        assert_eq!(
            config.reward_for(Verdict::Correct),
            RewardOutput { reward: 1.0, is_correct: true }
        );
        assert_eq!(config.reward_for(Verdict::Incorrect).reward, -0.5);
        assert_eq!(config.reward_for(Verdict::FormatError).reward, -1.0);
        let unk = config.reward_for(Verdict::UnknownError);
        assert_eq!(unk.reward, 0.25);
        assert!(!unk.is_correct);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = ToolAstConfig::load(Path::new("/nonexistent/toolast.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/toolast.json"));
    }
}
