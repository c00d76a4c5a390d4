//! Decision oracle adapters
//!
//! Implementations of the [`DecisionOracle`](council_application::DecisionOracle) port.

mod chat_completions;
mod random;

pub use chat_completions::{ChatCompletionsOracle, ChatOracleSettings};
pub use random::RandomOracle;
