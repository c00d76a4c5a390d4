//! Configuration file loading for werewolf-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./werewolf.toml` or `./.werewolf.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/werewolf-council/config.toml`
//! 4. Fallback: `~/.config/werewolf-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGameConfig, FileOracleConfig, FileOutputConfig,
    FileOutputFormat, OracleKind,
};
pub use loader::ConfigLoader;
