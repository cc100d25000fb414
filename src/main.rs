//! toolast: score tool-calling model outputs.
//!
//! Provides subcommands for working with the scoring core:
//!
//! - `score`         -- Score a JSONL file of `{task, response}` records
//! - `parse`         -- Extract tool calls from a piece of model output
//! - `render-tools`  -- Render the tool prompt block for a schema file
//! - `parsers`       -- List the registered tool parsers

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::json;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

use toolast::config::ToolAstConfig;
use toolast::parser::{get_tool_parser, ParserRegistry};
use toolast::reward::{RewardFn, RewardOutput, TaskInfo, ToolCallingAstReward};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// toolast: tool-call extraction and reward scoring
#[derive(Parser)]
#[command(name = "toolast", version, about)]
struct Cli {
    /// Path to a JSON configuration file (uses defaults if not provided).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the tool parser named in the configuration.
    #[arg(long, global = true)]
    parser: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score model responses against task ground truth.
    Score {
        /// JSONL file where each line is `{"task": {...}, "response": "..."}`.
        #[arg(long)]
        input: PathBuf,

        /// Number of scoring workers.
        #[arg(long, default_value_t = 4)]
        workers: usize,
    },

    /// Extract tool calls from model output and print them as JSON.
    Parse {
        /// File holding the model output (reads stdin if omitted).
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Print the tool prompt block for a JSON array of tool schemas.
    RenderTools {
        /// Path to the tool schema JSON file.
        schema: PathBuf,
    },

    /// List the registered tool parsers.
    Parsers,
}

/// One line of the `score` input file.
#[derive(Debug, Deserialize)]
struct ScoreRecord {
    task: TaskInfo,
    #[serde(default)]
    response: Option<String>,
}

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (reads RUST_LOG env var, defaults to info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ToolAstConfig::load(path)?,
        None => ToolAstConfig::default(),
    };
    if let Some(parser) = cli.parser {
        config.parser_name = parser;
    }

    match cli.command {
        Commands::Score { input, workers } => cmd_score(&config, &input, workers).await,
        Commands::Parse { file } => cmd_parse(&config, file.as_deref()),
        Commands::RenderTools { schema } => cmd_render_tools(&config, &schema),
        Commands::Parsers => cmd_parsers(),
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_score(config: &ToolAstConfig, input: &Path, workers: usize) -> Result<()> {
    let reward = Arc::new(ToolCallingAstReward::new(config.reward, &config.parser_name)?);

    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let mut records = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: ScoreRecord = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse record on line {}", line_no + 1))?;
        records.push((line_no + 1, record));
    }

    tracing::info!(
        records = records.len(),
        workers,
        parser = reward.parser_name(),
        "Scoring responses"
    );

    let chunk_size = records.len().div_ceil(workers.max(1)).max(1);
    let mut set = JoinSet::new();
    let mut remaining = records.into_iter();
    loop {
        let chunk: Vec<_> = remaining.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        let reward = Arc::clone(&reward);
        set.spawn_blocking(move || {
            chunk
                .into_iter()
                .map(|(line_no, record)| {
                    let response = record.response.unwrap_or_default();
                    (line_no, reward.evaluate(&record.task, &response))
                })
                .collect::<Vec<(usize, RewardOutput)>>()
        });
    }

    let mut scored = Vec::new();
    while let Some(result) = set.join_next().await {
        scored.extend(result.context("Scoring worker panicked")?);
    }
    scored.sort_by_key(|(line_no, _)| *line_no);

    for (line_no, output) in &scored {
        println!(
            "{}",
            json!({ "line": line_no, "reward": output.reward, "is_correct": output.is_correct })
        );
    }

    let total = scored.len();
    let correct = scored.iter().filter(|(_, o)| o.is_correct).count();
    let mean_reward = if total == 0 {
        0.0
    } else {
        scored.iter().map(|(_, o)| o.reward).sum::<f64>() / total as f64
    };
    tracing::info!(
        total,
        correct,
        accuracy = format!("{:.2}%", if total == 0 { 0.0 } else { correct as f64 / total as f64 * 100.0 }),
        mean_reward,
        "Scoring complete"
    );

    Ok(())
}

fn cmd_parse(config: &ToolAstConfig, file: Option<&Path>) -> Result<()> {
    let parser = get_tool_parser(&config.parser_name)?;

    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read model output from stdin")?;
            buf
        }
    };

    let calls = parser
        .parse(&text)
        .with_context(|| format!("No tool calls extracted with the `{}` parser", parser.name()))?;

    println!("{}", serde_json::to_string_pretty(&calls)?);
    Ok(())
}

fn cmd_render_tools(config: &ToolAstConfig, schema_path: &Path) -> Result<()> {
    let parser = get_tool_parser(&config.parser_name)?;

    let schema = std::fs::read_to_string(schema_path)
        .with_context(|| format!("Failed to read {}", schema_path.display()))?;
    if serde_json::from_str::<serde_json::Value>(&schema).is_err() {
        tracing::warn!(path = %schema_path.display(), "Tool schema is not valid JSON; rendering as-is");
    }

    println!("{}", parser.tool_prompt(&schema));
    Ok(())
}

fn cmd_parsers() -> Result<()> {
    for name in ParserRegistry::with_builtins().names() {
        println!("{name}");
    }
    Ok(())
}
