//! Decision collector
//!
//! Asks a group of participants for the same kind of structured decision,
//! validates every answer and applies the call site's fallback policy to the
//! ones that fail. Collection never fails as a whole: each request yields
//! exactly one [`CollectedDecision`], in request order.

use crate::ports::oracle::{DecisionOracle, OracleRequest};
use council_domain::{
    ChannelMessage, CollectedDecision, DecisionKind, DecisionOutcome, FallbackPolicy,
    InvalidReason, Model, ParticipantId, PromptTemplate, StructuredDecision, ValidationContext,
    interpret,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// How a batch of requests is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionMode {
    /// One request at a time, in order
    Serial,
    /// All requests at once; results are still returned in request order
    #[default]
    Concurrent,
}

impl std::str::FromStr for CollectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "serial" => Ok(CollectionMode::Serial),
            "concurrent" | "parallel" => Ok(CollectionMode::Concurrent),
            other => Err(format!(
                "Invalid vote mode: {}. Valid: serial, concurrent",
                other
            )),
        }
    }
}

/// What to ask one participant
#[derive(Debug, Clone)]
pub struct DecisionRequest {
    pub participant: ParticipantId,
    pub model: Model,
    pub system_prompt: String,
    /// The question itself (role-specific wording)
    pub instruction: String,
    /// Recent messages the participant observed, oldest first
    pub transcript: Vec<ChannelMessage>,
}

/// Collects structured decisions from a [`DecisionOracle`]
pub struct DecisionCollector {
    oracle: Arc<dyn DecisionOracle>,
    timeout: Option<Duration>,
    rng: Mutex<StdRng>,
}

impl DecisionCollector {
    pub fn new(oracle: Arc<dyn DecisionOracle>, seed: u64) -> Self {
        Self {
            oracle,
            timeout: None,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Collect one decision per request.
    ///
    /// The output has the same length and order as `requests` in both modes.
    /// Fallbacks are resolved in request order, so a seeded collector makes
    /// the same random picks whichever mode is used.
    pub async fn collect<T: DecisionKind>(
        &self,
        requests: Vec<DecisionRequest>,
        mode: CollectionMode,
        context: &ValidationContext,
        fallback: &FallbackPolicy,
    ) -> Vec<CollectedDecision<T>> {
        let schema = T::schema(context.eligible());
        let oracle_requests: Vec<OracleRequest> = requests
            .into_iter()
            .map(|request| Self::oracle_request::<T>(request, &schema, context))
            .collect();

        let answers = match mode {
            CollectionMode::Serial => {
                let mut answers = Vec::with_capacity(oracle_requests.len());
                for request in &oracle_requests {
                    answers.push(Self::ask(&self.oracle, request, self.timeout).await);
                }
                answers
            }
            CollectionMode::Concurrent => self.ask_all(&oracle_requests).await,
        };

        oracle_requests
            .into_iter()
            .zip(answers)
            .map(|(request, answer)| self.resolve(request.participant, answer, context, fallback))
            .collect()
    }

    /// Collect a single decision
    pub async fn collect_one<T: DecisionKind>(
        &self,
        request: DecisionRequest,
        context: &ValidationContext,
        fallback: &FallbackPolicy,
    ) -> CollectedDecision<T> {
        let schema = T::schema(context.eligible());
        let request = Self::oracle_request::<T>(request, &schema, context);
        let answer = Self::ask(&self.oracle, &request, self.timeout).await;
        self.resolve(request.participant, answer, context, fallback)
    }

    fn oracle_request<T: DecisionKind>(
        request: DecisionRequest,
        schema: &Value,
        context: &ValidationContext,
    ) -> OracleRequest {
        OracleRequest {
            decision: T::NAME,
            prompt: PromptTemplate::decision(&request.instruction, &request.transcript, schema),
            participant: request.participant,
            model: request.model,
            system_prompt: request.system_prompt,
            schema: schema.clone(),
            candidates: context.eligible().to_vec(),
        }
    }

    /// Fan out on a JoinSet and slot answers back by submission index
    async fn ask_all(&self, requests: &[OracleRequest]) -> Vec<Result<Value, InvalidReason>> {
        let mut join_set = JoinSet::new();

        for (index, request) in requests.iter().enumerate() {
            let oracle = Arc::clone(&self.oracle);
            let request = request.clone();
            let timeout = self.timeout;

            join_set.spawn(async move {
                let answer = Self::ask(&oracle, &request, timeout).await;
                (index, answer)
            });
        }

        let mut slots: Vec<Option<Result<Value, InvalidReason>>> =
            (0..requests.len()).map(|_| None).collect();

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, answer)) => slots[index] = Some(answer),
                Err(e) => warn!("Decision task join error: {}", e),
            }
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(InvalidReason::Oracle("decision task aborted".to_string()))
                })
            })
            .collect()
    }

    async fn ask(
        oracle: &Arc<dyn DecisionOracle>,
        request: &OracleRequest,
        timeout: Option<Duration>,
    ) -> Result<Value, InvalidReason> {
        let call = oracle.request(request);
        let result = match timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| InvalidReason::Timeout)?,
            None => call.await,
        };
        result.map_err(|e| InvalidReason::Oracle(e.to_string()))
    }

    fn resolve<T: DecisionKind>(
        &self,
        participant: ParticipantId,
        answer: Result<Value, InvalidReason>,
        context: &ValidationContext,
        fallback: &FallbackPolicy,
    ) -> CollectedDecision<T> {
        let decision = match answer {
            Ok(payload) => interpret::<T>(payload, context),
            Err(reason) => StructuredDecision::Invalid(reason),
        };

        let outcome = match decision {
            StructuredDecision::Valid(decision) => {
                debug!("{} decision from {}: {:?}", T::NAME, participant, decision);
                DecisionOutcome::Valid(decision)
            }
            StructuredDecision::Invalid(reason) => {
                let action = fallback.apply(|eligible| self.pick(eligible));
                warn!(
                    "Invalid {} decision from {} ({}), falling back to {:?}",
                    T::NAME,
                    participant,
                    reason,
                    action
                );
                DecisionOutcome::Fallback { reason, action }
            }
        };

        CollectedDecision {
            participant,
            outcome,
        }
    }

    fn pick(&self, eligible: &[ParticipantId]) -> ParticipantId {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        eligible[rng.random_range(0..eligible.len())].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::oracle::OracleError;
    use async_trait::async_trait;
    use council_domain::{FallbackAction, KillDecision, VoteDecision};
    use serde_json::json;

    /// Answers votes for "X", sleeping longer for earlier participants
    struct ReversedDelayOracle;

    #[async_trait]
    impl DecisionOracle for ReversedDelayOracle {
        async fn request(&self, request: &OracleRequest) -> Result<Value, OracleError> {
            let delay = match request.participant.as_str() {
                "A" => 60,
                "B" => 30,
                _ => 0,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(json!({
                "vote": "X",
                "reason": format!("from {}", request.participant),
                "suspicion_level": 5
            }))
        }
    }

    /// Every request fails
    struct FailingOracle;

    #[async_trait]
    impl DecisionOracle for FailingOracle {
        async fn request(&self, _request: &OracleRequest) -> Result<Value, OracleError> {
            Err(OracleError::ConnectionError("offline".to_string()))
        }
    }

    /// Never answers
    struct HangingOracle;

    #[async_trait]
    impl DecisionOracle for HangingOracle {
        async fn request(&self, _request: &OracleRequest) -> Result<Value, OracleError> {
            std::future::pending().await
        }
    }

    /// Panics for "B", answers a malformed payload otherwise
    struct PanickingOracle;

    #[async_trait]
    impl DecisionOracle for PanickingOracle {
        async fn request(&self, request: &OracleRequest) -> Result<Value, OracleError> {
            if request.participant.as_str() == "B" {
                panic!("oracle crashed");
            }
            Ok(json!({"vote": 42}))
        }
    }

    fn requests(names: &[&str]) -> Vec<DecisionRequest> {
        names
            .iter()
            .map(|name| DecisionRequest {
                participant: ParticipantId::new(*name),
                model: Model::default(),
                system_prompt: String::new(),
                instruction: "Vote.".to_string(),
                transcript: Vec::new(),
            })
            .collect()
    }

    fn context() -> ValidationContext {
        ValidationContext::new(vec!["X".into(), "Y".into()])
    }

    fn participants<T>(decisions: &[CollectedDecision<T>]) -> Vec<&str> {
        decisions.iter().map(|d| d.participant.as_str()).collect()
    }

    #[tokio::test]
    async fn test_concurrent_preserves_request_order() {
        let collector = DecisionCollector::new(Arc::new(ReversedDelayOracle), 1);
        let decisions = collector
            .collect::<VoteDecision>(
                requests(&["A", "B", "C"]),
                CollectionMode::Concurrent,
                &context(),
                &FallbackPolicy::Abstain,
            )
            .await;

        assert_eq!(participants(&decisions), vec!["A", "B", "C"]);
        for decision in &decisions {
            let vote = decision.outcome.valid().unwrap();
            assert_eq!(vote.reason, format!("from {}", decision.participant));
        }
    }

    #[tokio::test]
    async fn test_serial_preserves_request_order() {
        let collector = DecisionCollector::new(Arc::new(ReversedDelayOracle), 1);
        let decisions = collector
            .collect::<VoteDecision>(
                requests(&["C", "A"]),
                CollectionMode::Serial,
                &context(),
                &FallbackPolicy::Abstain,
            )
            .await;
        assert_eq!(participants(&decisions), vec!["C", "A"]);
        assert!(decisions.iter().all(|d| d.outcome.is_valid()));
    }

    #[tokio::test]
    async fn test_oracle_failure_falls_back() {
        let collector = DecisionCollector::new(Arc::new(FailingOracle), 1);
        let decisions = collector
            .collect::<VoteDecision>(
                requests(&["A"]),
                CollectionMode::Concurrent,
                &context(),
                &FallbackPolicy::Abstain,
            )
            .await;

        match &decisions[0].outcome {
            DecisionOutcome::Fallback { reason, action } => {
                assert!(matches!(reason, InvalidReason::Oracle(_)));
                assert_eq!(*action, FallbackAction::Abstain);
            }
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(decisions[0].target(), None);
    }

    #[tokio::test]
    async fn test_random_fallback_picks_eligible_target() {
        let collector = DecisionCollector::new(Arc::new(FailingOracle), 42);
        let eligible = vec![ParticipantId::new("X"), ParticipantId::new("Y")];
        let decisions = collector
            .collect::<KillDecision>(
                requests(&["A", "B"]),
                CollectionMode::Concurrent,
                &ValidationContext::new(eligible.clone()),
                &FallbackPolicy::RandomValidTarget(eligible.clone()),
            )
            .await;

        for decision in &decisions {
            let target = decision.target().unwrap();
            assert!(eligible.contains(target));
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_fallbacks() {
        let eligible: Vec<ParticipantId> = ["P", "Q", "R", "S"].iter().map(|n| (*n).into()).collect();
        let run = |mode| {
            let eligible = eligible.clone();
            async move {
                let collector = DecisionCollector::new(Arc::new(FailingOracle), 9);
                collector
                    .collect::<KillDecision>(
                        requests(&["A", "B", "C"]),
                        mode,
                        &ValidationContext::new(eligible.clone()),
                        &FallbackPolicy::RandomValidTarget(eligible),
                    )
                    .await
                    .iter()
                    .map(|d| d.target().cloned())
                    .collect::<Vec<_>>()
            }
        };

        let serial = run(CollectionMode::Serial).await;
        let concurrent = run(CollectionMode::Concurrent).await;
        assert_eq!(serial, concurrent);
    }

    #[tokio::test]
    async fn test_timeout_is_invalid() {
        let collector = DecisionCollector::new(Arc::new(HangingOracle), 1)
            .with_timeout(Some(Duration::from_millis(20)));
        let decision = collector
            .collect_one::<VoteDecision>(
                requests(&["A"]).remove(0),
                &context(),
                &FallbackPolicy::Abstain,
            )
            .await;

        assert_eq!(
            decision.outcome,
            DecisionOutcome::Fallback {
                reason: InvalidReason::Timeout,
                action: FallbackAction::Abstain
            }
        );
    }

    #[tokio::test]
    async fn test_panicking_task_is_invalid_and_keeps_slot() {
        let collector = DecisionCollector::new(Arc::new(PanickingOracle), 1);
        let decisions = collector
            .collect::<VoteDecision>(
                requests(&["A", "B", "C"]),
                CollectionMode::Concurrent,
                &context(),
                &FallbackPolicy::SkipAbility,
            )
            .await;

        assert_eq!(participants(&decisions), vec!["A", "B", "C"]);
        assert!(matches!(
            decisions[0].outcome,
            DecisionOutcome::Fallback {
                reason: InvalidReason::Malformed(_),
                ..
            }
        ));
        assert_eq!(
            decisions[1].outcome,
            DecisionOutcome::Fallback {
                reason: InvalidReason::Oracle("decision task aborted".to_string()),
                action: FallbackAction::SkipAbility
            }
        );
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Serial".parse::<CollectionMode>(), Ok(CollectionMode::Serial));
        assert_eq!("parallel".parse::<CollectionMode>(), Ok(CollectionMode::Concurrent));
        assert!("random".parse::<CollectionMode>().is_err());
    }
}
