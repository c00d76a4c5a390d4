//! Application-level configuration.
//!
//! - [`GameConfig`]: table size, role table, round ceilings, vote mode, seed

pub mod game_config;

pub use game_config::{DEFAULT_NAMES, GameConfig};
