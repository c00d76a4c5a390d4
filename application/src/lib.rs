//! Application layer for werewolf-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_NAMES, GameConfig};
pub use ports::{
    announcement_sink::{AnnouncementSink, CompositeAnnouncementSink, NoAnnouncementSink},
    oracle::{DecisionOracle, OracleError, OracleRequest},
    progress::{GameProgressNotifier, NoProgress},
};
pub use use_cases::collect_decisions::{CollectionMode, DecisionCollector, DecisionRequest};
pub use use_cases::run_game::{RunGameError, RunGameUseCase};
