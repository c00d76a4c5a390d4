//! Offline oracle that plays by coin flips
//!
//! Answers every decision kind with a well-formed random choice among the
//! request's candidates, so a full game runs without any network access.

use async_trait::async_trait;
use council_application::{DecisionOracle, OracleError, OracleRequest};
use council_domain::ParticipantId;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};
use std::sync::{Mutex, PoisonError};

const STATEMENTS: [&str; 6] = [
    "I have been watching closely and I am not convinced yet.",
    "Someone here is lying, and I intend to find out who.",
    "I trust the quiet ones less than the loud ones.",
    "Let us not rush. A wrong vote only helps the wolves.",
    "I have nothing to hide. Ask me anything.",
    "The last vote told us more than any speech.",
];

/// Seeded random decision oracle
pub struct RandomOracle {
    rng: Mutex<StdRng>,
}

impl RandomOracle {
    /// A seed of `None` draws one from entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn answer(&self, request: &OracleRequest) -> Result<Value, OracleError> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let rng = &mut *rng;

        // Prefer not to name yourself when there is anyone else to name
        let others: Vec<&ParticipantId> = request
            .candidates
            .iter()
            .filter(|c| **c != request.participant)
            .collect();
        let pool: Vec<&ParticipantId> = if others.is_empty() {
            request.candidates.iter().collect()
        } else {
            others
        };
        let target = pool.choose(rng).map(|id| (*id).clone());
        let require_target = || {
            target.clone().ok_or_else(|| {
                OracleError::Other(format!("no candidates for '{}'", request.decision))
            })
        };

        let answer = match request.decision {
            "discussion" => json!({
                "statement": STATEMENTS.choose(rng).copied().unwrap_or(STATEMENTS[0]),
                "reach_agreement": rng.random_bool(0.6),
                "confidence_level": rng.random_range(1..=10),
            }),
            "kill" => json!({
                "target": require_target()?,
                "kill_strategy": "They seem the most dangerous to us.",
            }),
            "inspect" => json!({
                "target": require_target()?,
                "check_reason": "I cannot read them yet.",
                "priority_level": rng.random_range(1..=10),
            }),
            "guard" => json!({
                "target": require_target()?,
                "reason": "A hunch.",
            }),
            "witch" => {
                let use_antidote = rng.random_bool(0.5);
                let use_poison = !use_antidote && target.is_some() && rng.random_bool(0.2);
                json!({
                    "use_antidote": use_antidote,
                    "use_poison": use_poison,
                    "target_name": if use_poison { target.clone() } else { None },
                    "action_reason": "Fortune favours the bold.",
                })
            }
            "vote" => json!({
                "vote": require_target()?,
                "reason": "Their story does not add up.",
                "suspicion_level": rng.random_range(1..=10),
            }),
            "shoot" => json!({
                "shoot": target.is_some(),
                "target": target,
                "shoot_reason": "I will not go alone.",
            }),
            other => {
                return Err(OracleError::Other(format!(
                    "unknown decision kind '{}'",
                    other
                )));
            }
        };
        Ok(answer)
    }
}

#[async_trait]
impl DecisionOracle for RandomOracle {
    async fn request(&self, request: &OracleRequest) -> Result<Value, OracleError> {
        self.answer(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        DecisionKind, DiscussionTurn, GuardDecision, InspectDecision, KillDecision, Model,
        ShootDecision, ValidationContext, VoteDecision, WitchDecision, interpret,
    };

    fn ids(names: &[&str]) -> Vec<ParticipantId> {
        names.iter().map(|n| ParticipantId::from(*n)).collect()
    }

    fn request<T: DecisionKind>(participant: &str, candidates: &[&str]) -> OracleRequest {
        let candidates = ids(candidates);
        OracleRequest {
            decision: T::NAME,
            participant: participant.into(),
            model: Model::default(),
            system_prompt: String::new(),
            prompt: String::new(),
            schema: T::schema(&candidates),
            candidates,
        }
    }

    async fn assert_valid<T: DecisionKind>(oracle: &RandomOracle) {
        let candidates = ["Cao Cao", "Lu Bu", "Sun Quan"];
        let request = request::<T>("Liu Bei", &candidates);
        let answer = oracle.request(&request).await.unwrap();
        let decision = interpret::<T>(answer, &ValidationContext::new(ids(&candidates)));
        assert!(decision.is_valid(), "{} answer was invalid", T::NAME);
    }

    #[tokio::test]
    async fn test_every_kind_is_valid() {
        let oracle = RandomOracle::new(Some(3));
        for _ in 0..20 {
            assert_valid::<DiscussionTurn>(&oracle).await;
            assert_valid::<KillDecision>(&oracle).await;
            assert_valid::<InspectDecision>(&oracle).await;
            assert_valid::<GuardDecision>(&oracle).await;
            assert_valid::<WitchDecision>(&oracle).await;
            assert_valid::<VoteDecision>(&oracle).await;
            assert_valid::<ShootDecision>(&oracle).await;
        }
    }

    #[tokio::test]
    async fn test_avoids_self_when_possible() {
        let oracle = RandomOracle::new(Some(9));
        let request = request::<VoteDecision>("Liu Bei", &["Liu Bei", "Cao Cao"]);
        for _ in 0..10 {
            let answer = oracle.request(&request).await.unwrap();
            assert_eq!(answer["vote"], "Cao Cao");
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_answers() {
        let request = request::<KillDecision>("Cao Cao", &["A", "B", "C", "D"]);
        let (first, second) = (RandomOracle::new(Some(5)), RandomOracle::new(Some(5)));
        for _ in 0..5 {
            assert_eq!(
                first.request(&request).await.unwrap(),
                second.request(&request).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_no_candidates_is_an_error() {
        let oracle = RandomOracle::new(Some(1));
        let guard = request::<GuardDecision>("Liu Bei", &[]);
        assert!(oracle.request(&guard).await.is_err());

        let shoot = request::<ShootDecision>("Liu Bei", &[]);
        assert_eq!(oracle.request(&shoot).await.unwrap()["shoot"], false);
    }
}
