//! Infrastructure layer for werewolf-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod oracle;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGameConfig, FileOracleConfig,
    FileOutputConfig, FileOutputFormat, OracleKind,
};
pub use logging::JsonlAnnouncementLogger;
pub use oracle::{ChatCompletionsOracle, ChatOracleSettings, RandomOracle};
