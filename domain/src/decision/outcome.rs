//! Decision results and fallback policies

use crate::game::participant::ParticipantId;
use thiserror::Error;

/// Why a decision could not be used.
///
/// Oracle failures and bad answers are deliberately the same type: both are
/// recovered by the call site's [`FallbackPolicy`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    #[error("oracle failed: {0}")]
    Oracle(String),

    #[error("oracle timed out")]
    Timeout,

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("field '{field}' names '{target}', who is not an eligible participant")]
    IneligibleTarget {
        field: &'static str,
        target: ParticipantId,
    },
}

/// A validated decision, or the explicit marker that there is none
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredDecision<T> {
    Valid(T),
    Invalid(InvalidReason),
}

impl<T> StructuredDecision<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, StructuredDecision::Valid(_))
    }
}

/// Substitute action chosen per call site for invalid decisions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Pick uniformly among these participants
    RandomValidTarget(Vec<ParticipantId>),
    /// Record no decision
    Abstain,
    /// Treat as "ability not used"
    SkipAbility,
}

impl FallbackPolicy {
    /// Resolve the policy. `pick` chooses among the eligible set; it is only
    /// called for a non-empty set. An empty eligible set degrades to abstain.
    pub fn apply<F>(&self, pick: F) -> FallbackAction
    where
        F: FnOnce(&[ParticipantId]) -> ParticipantId,
    {
        match self {
            FallbackPolicy::RandomValidTarget(eligible) if !eligible.is_empty() => {
                FallbackAction::Target(pick(eligible))
            }
            FallbackPolicy::RandomValidTarget(_) | FallbackPolicy::Abstain => {
                FallbackAction::Abstain
            }
            FallbackPolicy::SkipAbility => FallbackAction::SkipAbility,
        }
    }
}

/// What a fallback policy resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackAction {
    Target(ParticipantId),
    Abstain,
    SkipAbility,
}

/// A decision after validation and fallback
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionOutcome<T> {
    Valid(T),
    Fallback {
        reason: InvalidReason,
        action: FallbackAction,
    },
}

impl<T> DecisionOutcome<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            DecisionOutcome::Valid(decision) => Some(decision),
            DecisionOutcome::Fallback { .. } => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid().is_some()
    }
}

/// One participant's entry in a collection result
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedDecision<T> {
    pub participant: ParticipantId,
    pub outcome: DecisionOutcome<T>,
}

impl<T: super::kinds::DecisionKind> CollectedDecision<T> {
    /// The target this entry points at: the decision's own target when valid,
    /// the fallback's pick otherwise
    pub fn target(&self) -> Option<&ParticipantId> {
        match &self.outcome {
            DecisionOutcome::Valid(decision) => decision.target(),
            DecisionOutcome::Fallback {
                action: FallbackAction::Target(id),
                ..
            } => Some(id),
            DecisionOutcome::Fallback { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_target_picks_from_eligible() {
        let eligible = vec![ParticipantId::new("B"), ParticipantId::new("C")];
        let action = FallbackPolicy::RandomValidTarget(eligible).apply(|set| set[1].clone());
        assert_eq!(action, FallbackAction::Target("C".into()));
    }

    #[test]
    fn test_random_target_empty_set_abstains() {
        let action = FallbackPolicy::RandomValidTarget(vec![])
            .apply(|_| unreachable!("no eligible participants"));
        assert_eq!(action, FallbackAction::Abstain);
    }

    #[test]
    fn test_skip_and_abstain() {
        assert_eq!(
            FallbackPolicy::SkipAbility.apply(|_| unreachable!()),
            FallbackAction::SkipAbility
        );
        assert_eq!(
            FallbackPolicy::Abstain.apply(|_| unreachable!()),
            FallbackAction::Abstain
        );
    }

    #[test]
    fn test_reason_display() {
        let reason = InvalidReason::OutOfRange {
            field: "suspicion_level",
            value: 11,
            min: 1,
            max: 10,
        };
        assert_eq!(
            reason.to_string(),
            "field 'suspicion_level' = 11 is outside 1..=10"
        );
    }
}
