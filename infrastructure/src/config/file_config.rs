//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use council_application::{CollectionMode, GameConfig};
use council_domain::{Model, OutputFormat, RoleDistribution, SetupError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

// Re-export OutputFormat from domain for convenience
pub use council_domain::OutputFormat as FileOutputFormat;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("decision_timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("participant name cannot be empty")]
    EmptyParticipantName,

    #[error("oracle.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("invalid [roles] table: {0}")]
    InvalidRoles(#[from] SetupError),
}

/// Which oracle backs the participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    /// Offline seeded bot
    #[default]
    Random,
    /// OpenAI-compatible chat completions endpoint
    Chat,
}

impl std::str::FromStr for OracleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" | "offline" => Ok(OracleKind::Random),
            "chat" | "openai" => Ok(OracleKind::Chat),
            other => Err(format!("Invalid oracle: {}. Valid: random, chat", other)),
        }
    }
}

/// Raw game configuration from TOML (`[game]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    /// Number of seats
    pub players: usize,
    /// Seat names in seating order
    pub names: Vec<String>,
    pub max_rounds: u32,
    pub max_discussion_rounds: usize,
    /// "serial" or "concurrent"
    pub vote_mode: CollectionMode,
    pub seed: Option<u64>,
    /// Per-request oracle timeout; no timeout when unset
    pub decision_timeout_seconds: Option<u64>,
    pub shuffle_roles: bool,
    /// Observed messages included in each prompt
    pub transcript_limit: usize,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        let defaults = GameConfig::default();
        Self {
            players: defaults.player_count,
            names: Vec::new(),
            max_rounds: defaults.max_rounds,
            max_discussion_rounds: defaults.max_discussion_rounds,
            vote_mode: defaults.vote_mode,
            seed: None,
            decision_timeout_seconds: defaults.decision_timeout.map(|d| d.as_secs()),
            shuffle_roles: defaults.shuffle_roles,
            transcript_limit: defaults.transcript_limit,
        }
    }
}

/// Raw oracle configuration from TOML (`[oracle]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOracleConfig {
    pub kind: OracleKind,
    /// Model names, assigned to seats round-robin
    pub models: Vec<String>,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for FileOracleConfig {
    fn default() -> Self {
        Self {
            kind: OracleKind::Random,
            models: Vec::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
        }
    }
}

impl FileOracleConfig {
    pub fn parse_models(&self) -> Vec<Model> {
        self.models.iter().map(Model::new).collect()
    }
}

/// Raw output configuration from TOML (`[output]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Write every announcement to this JSONL file
    pub log_file: Option<PathBuf>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            log_file: None,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Game settings
    pub game: FileGameConfig,
    /// Explicit role table (`role = count`); the standard table when empty
    pub roles: BTreeMap<String, usize>,
    /// Oracle settings
    pub oracle: FileOracleConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.game.decision_timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.oracle.models.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if self.game.names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyParticipantName);
        }

        if self.oracle.kind == OracleKind::Chat && self.oracle.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }

        self.role_distribution()?;
        Ok(())
    }

    /// The `[roles]` table, if one is configured
    pub fn role_distribution(&self) -> Result<Option<RoleDistribution>, SetupError> {
        if self.roles.is_empty() {
            return Ok(None);
        }
        RoleDistribution::parse_table(self.roles.iter().map(|(name, count)| (name.as_str(), *count)))
            .map(Some)
    }

    /// Build the application-level game configuration
    pub fn to_game_config(&self) -> Result<GameConfig, ConfigValidationError> {
        self.validate()?;

        let game = &self.game;
        let mut config = GameConfig::default()
            .with_player_count(game.players)
            .with_max_rounds(game.max_rounds)
            .with_max_discussion_rounds(game.max_discussion_rounds)
            .with_vote_mode(game.vote_mode)
            .with_decision_timeout(game.decision_timeout_seconds.map(Duration::from_secs))
            .with_shuffle_roles(game.shuffle_roles)
            .with_models(self.oracle.parse_models());
        config.names = game.names.clone();
        config.transcript_limit = game.transcript_limit;
        config.seed = game.seed;
        config.roles = self.role_distribution()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::Role;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[game]
players = 8
names = ["A", "B", "C", "D", "E", "F", "G", "H"]
max_rounds = 5
vote_mode = "serial"
seed = 42
decision_timeout_seconds = 30

[roles]
werewolf = 2
seer = 1
witch = 1
hunter = 1
villager = 3

[oracle]
kind = "chat"
models = ["qwen-plus", "gpt-4o-mini"]
base_url = "http://localhost:11434/v1"

[output]
format = "summary"
color = false
log_file = "game.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.players, 8);
        assert_eq!(config.game.vote_mode, CollectionMode::Serial);
        assert_eq!(config.roles.get("werewolf"), Some(&2));
        assert_eq!(config.oracle.kind, OracleKind::Chat);
        assert_eq!(config.oracle.models.len(), 2);
        assert_eq!(config.output.format, Some(OutputFormat::Summary));
        assert!(!config.output.color);
        assert_eq!(config.output.log_file, Some(PathBuf::from("game.jsonl")));

        let game = config.to_game_config().unwrap();
        assert_eq!(game.player_count, 8);
        assert_eq!(game.seed, Some(42));
        assert_eq!(game.decision_timeout, Some(Duration::from_secs(30)));
        assert_eq!(game.model_for(1), Model::new("gpt-4o-mini"));
        let roles = game.roles.unwrap();
        assert_eq!(roles.count(Role::Werewolf), 2);
        assert_eq!(roles.total(), 8);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[game]
max_rounds = 3
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.max_rounds, 3);
        // Defaults should apply
        assert_eq!(config.game.players, 6);
        assert_eq!(config.oracle.kind, OracleKind::Random);
        assert!(config.roles.is_empty());
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config_matches_game_defaults() {
        let game = FileConfig::default().to_game_config().unwrap();
        let defaults = GameConfig::default();
        assert_eq!(game.player_count, defaults.player_count);
        assert_eq!(game.max_rounds, defaults.max_rounds);
        assert_eq!(game.decision_timeout, defaults.decision_timeout);
        assert!(game.roles.is_none());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.game.decision_timeout_seconds = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_validate_empty_model_name() {
        let mut config = FileConfig::default();
        config.oracle.models = vec!["qwen-plus".to_string(), "  ".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        ));
    }

    #[test]
    fn test_validate_unknown_role() {
        let mut config = FileConfig::default();
        config.roles.insert("vampire".to_string(), 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRoles(SetupError::UnknownRole(_)))
        ));
    }

    #[test]
    fn test_oracle_kind_from_str() {
        assert_eq!("chat".parse::<OracleKind>(), Ok(OracleKind::Chat));
        assert_eq!("Random".parse::<OracleKind>(), Ok(OracleKind::Random));
        assert!("bedrock".parse::<OracleKind>().is_err());
    }
}
