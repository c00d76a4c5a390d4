//! Vote aggregation
//!
//! Plurality tally with a deterministic tie-break, used for both the
//! werewolves' nightly kill vote and the village's daily elimination vote.

pub mod tally;

pub use tally::{Ballot, VoteTally, tally};
