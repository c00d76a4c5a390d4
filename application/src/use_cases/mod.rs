//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod collect_decisions;
pub mod run_game;
