//! Structured decisions
//!
//! | Kind | Asked of | Fallback at call site |
//! |------|----------|-----------------------|
//! | [`DiscussionTurn`] | everyone speaking | abstain (stays silent) |
//! | [`KillDecision`] | werewolves | random non-werewolf |
//! | [`GuardDecision`] | guardian | abstain |
//! | [`InspectDecision`] | seer | abstain |
//! | [`WitchDecision`] | witch | skip ability |
//! | [`VoteDecision`] | everyone alive | abstain |
//! | [`ShootDecision`] | eliminated hunter | skip ability |

pub mod kinds;
pub mod outcome;
pub mod parsing;

pub use kinds::{
    DecisionKind, DiscussionTurn, GuardDecision, InspectDecision, KillDecision, ShootDecision,
    ValidationContext, VoteDecision, WitchDecision, interpret,
};
pub use outcome::{
    CollectedDecision, DecisionOutcome, FallbackAction, FallbackPolicy, InvalidReason,
    StructuredDecision,
};
pub use parsing::extract_json_object;
