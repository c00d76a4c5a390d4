//! Plurality vote tally
//!
//! This module defines the voting primitives shared by the werewolves' kill
//! vote and the village's elimination vote.

use crate::game::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// A single ballot: who voted, and for whom (`None` = abstained)
///
/// # Example
///
/// ```
/// use council_domain::vote::Ballot;
///
/// let ballot = Ballot::new("Liu Bei", Some("Cao Cao"));
/// assert!(!ballot.is_abstention());
///
/// let silent = Ballot::abstain("Sun Quan");
/// assert!(silent.is_abstention());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub voter: ParticipantId,
    pub target: Option<ParticipantId>,
}

impl Ballot {
    pub fn new(voter: impl Into<ParticipantId>, target: Option<impl Into<ParticipantId>>) -> Self {
        Self {
            voter: voter.into(),
            target: target.map(Into::into),
        }
    }

    pub fn abstain(voter: impl Into<ParticipantId>) -> Self {
        Self {
            voter: voter.into(),
            target: None,
        }
    }

    pub fn is_abstention(&self) -> bool {
        self.target.is_none()
    }
}

/// Result of a tally
///
/// `winner` is always a participant that received at least one vote, or
/// `None` (with `count == 0`) when every ballot abstained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub winner: Option<ParticipantId>,
    pub count: usize,
    /// Per-target counts, in order of each target's first vote
    pub counts: Vec<(ParticipantId, usize)>,
    /// All ballots, in the order they were tallied
    pub ballots: Vec<Ballot>,
}

impl VoteTally {
    pub fn abstentions(&self) -> usize {
        self.ballots.iter().filter(|b| b.is_abstention()).count()
    }

    /// Whether every non-abstaining ballot named the winner
    pub fn is_unanimous(&self) -> bool {
        self.winner.is_some() && self.counts.len() == 1
    }

    /// Votes received by `target`
    pub fn votes_for(&self, target: &ParticipantId) -> usize {
        self.counts
            .iter()
            .find(|(id, _)| id == target)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Human-readable breakdown, e.g. "Cao Cao: 2, Lu Bu: 1 (1 abstained)"
    pub fn summary(&self) -> String {
        let mut summary = self
            .counts
            .iter()
            .map(|(id, count)| format!("{}: {}", id, count))
            .collect::<Vec<_>>()
            .join(", ");
        if summary.is_empty() {
            summary.push_str("no votes");
        }
        let abstained = self.abstentions();
        if abstained > 0 {
            summary.push_str(&format!(" ({} abstained)", abstained));
        }
        summary
    }
}

/// Tally ballots by plurality.
///
/// Ballots must be given in seating order of the voters. The target with the
/// strictly highest count wins; on a tie the target that was voted for first
/// (walking ballots in order) wins.
pub fn tally(ballots: Vec<Ballot>) -> VoteTally {
    let mut counts: Vec<(ParticipantId, usize)> = Vec::new();

    for target in ballots.iter().filter_map(|b| b.target.as_ref()) {
        match counts.iter_mut().find(|(id, _)| id == target) {
            Some((_, count)) => *count += 1,
            None => counts.push((target.clone(), 1)),
        }
    }

    // `counts` is in first-vote order; a later equal count never displaces
    // the leader
    let mut winner: Option<&(ParticipantId, usize)> = None;
    for entry in &counts {
        if winner.is_none_or(|(_, best)| entry.1 > *best) {
            winner = Some(entry);
        }
    }
    let (winner, count) = match winner {
        Some((id, count)) => (Some(id.clone()), *count),
        None => (None, 0),
    };

    VoteTally {
        winner,
        count,
        counts,
        ballots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ballot(voter: &str, target: &str) -> Ballot {
        Ballot::new(voter, Some(target))
    }

    #[test]
    fn test_majority_wins() {
        let result = tally(vec![ballot("A", "X"), ballot("B", "X"), ballot("C", "Y")]);
        assert_eq!(result.winner, Some("X".into()));
        assert_eq!(result.count, 2);
        assert_eq!(result.votes_for(&"Y".into()), 1);
        assert!(!result.is_unanimous());
    }

    #[test]
    fn test_tie_goes_to_first_voted_target() {
        let result = tally(vec![ballot("A", "Y"), ballot("B", "X")]);
        assert_eq!(result.winner, Some("Y".into()));
        assert_eq!(result.count, 1);

        let result = tally(vec![
            ballot("A", "Y"),
            ballot("B", "X"),
            ballot("C", "X"),
            ballot("D", "Y"),
        ]);
        assert_eq!(result.winner, Some("Y".into()));
        assert_eq!(result.count, 2);
        assert_eq!(result.counts, vec![("Y".into(), 2), ("X".into(), 2)]);
    }

    #[test]
    fn test_all_abstain() {
        let result = tally(vec![Ballot::abstain("A"), Ballot::abstain("B")]);
        assert_eq!(result.winner, None);
        assert_eq!(result.count, 0);
        assert_eq!(result.abstentions(), 2);
        assert_eq!(result.summary(), "no votes (2 abstained)");
    }

    #[test]
    fn test_empty() {
        let result = tally(vec![]);
        assert_eq!(result.winner, None);
        assert_eq!(result.count, 0);
    }

    #[test]
    fn test_abstentions_ignored() {
        let result = tally(vec![
            Ballot::abstain("A"),
            ballot("B", "Z"),
            Ballot::abstain("C"),
        ]);
        assert_eq!(result.winner, Some("Z".into()));
        assert!(result.is_unanimous());
        assert_eq!(result.summary(), "Z: 1 (2 abstained)");
    }
}
