//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::OutputFormat;
use std::path::PathBuf;

/// Which oracle plays the participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OracleChoice {
    /// Offline seeded bot, no network access
    Random,
    /// OpenAI-compatible chat completions endpoint
    Chat,
}

/// CLI arguments for werewolf-council
#[derive(Parser, Debug)]
#[command(name = "werewolf-council")]
#[command(author, version, about = "Werewolf played by a council of decision oracles")]
#[command(long_about = r#"
Werewolf Council runs one game of Werewolf where every seat is played by a
decision oracle (an LLM behind an OpenAI-compatible API, or an offline bot).

Each round has two halves:
1. Night: werewolves pick a victim, then guardian, seer and witch act
2. Day: open discussion, a simultaneous vote, and the hunter's last shot

Configuration files are loaded from (in priority order):
1. --config <path>      Explicit config file
2. ./werewolf.toml      Project-level config
3. ~/.config/werewolf-council/config.toml   Global config

Example:
  werewolf-council --players 8 --seed 42
  werewolf-council --oracle chat -m qwen-plus -m gpt-4o-mini --base-url http://localhost:11434/v1
  werewolf-council --output json --log-file game.jsonl
"#)]
pub struct Cli {
    /// Number of seats at the table
    #[arg(short, long, value_name = "N")]
    pub players: Option<usize>,

    /// Abort the game if no team has won after this many rounds
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<u32>,

    /// Seed for role dealing and random fallbacks
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Oracle backing every participant
    #[arg(long, value_enum)]
    pub oracle: Option<OracleChoice>,

    /// Models assigned to seats round-robin (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Ask voters one at a time instead of all at once
    #[arg(long)]
    pub serial_votes: bool,

    /// Write every announcement to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Output format: full, summary or json
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
