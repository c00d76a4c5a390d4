//! Typed decision kinds
//!
//! Each kind is a plain struct deserialized from the oracle's JSON payload,
//! then checked against a [`ValidationContext`] (targets must be eligible,
//! bounded integers must be in range, conditional fields must be present).

use super::outcome::{InvalidReason, StructuredDecision};
use crate::game::participant::ParticipantId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Participants a decision may name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    eligible: Vec<ParticipantId>,
}

impl ValidationContext {
    pub fn new(eligible: Vec<ParticipantId>) -> Self {
        Self { eligible }
    }

    pub fn eligible(&self) -> &[ParticipantId] {
        &self.eligible
    }

    pub fn check_target(
        &self,
        field: &'static str,
        target: &ParticipantId,
    ) -> Result<(), InvalidReason> {
        if self.eligible.contains(target) {
            Ok(())
        } else {
            Err(InvalidReason::IneligibleTarget {
                field,
                target: target.clone(),
            })
        }
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), InvalidReason> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InvalidReason::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn candidate_schema(candidates: &[ParticipantId]) -> Value {
    json!({ "type": "string", "enum": candidates })
}

fn level_schema(description: &str) -> Value {
    json!({ "type": "integer", "minimum": 1, "maximum": 10, "description": description })
}

/// A structured answer the oracle can be asked for
pub trait DecisionKind: DeserializeOwned + Clone + Send + std::fmt::Debug + 'static {
    /// Short identifier used in logs and prompts
    const NAME: &'static str;

    /// JSON schema handed to the oracle. `candidates` are the names the
    /// decision may target.
    fn schema(candidates: &[ParticipantId]) -> Value;

    /// Semantic checks beyond deserialization
    fn validate(&self, context: &ValidationContext) -> Result<(), InvalidReason>;

    /// Participant the decision points at, if any
    fn target(&self) -> Option<&ParticipantId> {
        None
    }
}

/// Deserialize and validate an oracle payload
pub fn interpret<T: DecisionKind>(
    payload: Value,
    context: &ValidationContext,
) -> StructuredDecision<T> {
    let decision: T = match serde_json::from_value(payload) {
        Ok(decision) => decision,
        Err(e) => return StructuredDecision::Invalid(InvalidReason::Malformed(e.to_string())),
    };
    match decision.validate(context) {
        Ok(()) => StructuredDecision::Valid(decision),
        Err(reason) => StructuredDecision::Invalid(reason),
    }
}

fn default_confidence() -> i64 {
    5
}

/// One turn of discussion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionTurn {
    /// What the participant says to the channel
    pub statement: String,
    #[serde(default)]
    pub reach_agreement: bool,
    #[serde(default = "default_confidence")]
    pub confidence_level: i64,
    #[serde(default)]
    pub key_evidence: Option<String>,
}

impl DecisionKind for DiscussionTurn {
    const NAME: &'static str = "discussion";

    fn schema(_candidates: &[ParticipantId]) -> Value {
        json!({
            "type": "object",
            "properties": {
                "statement": { "type": "string", "description": "What you say to the others" },
                "reach_agreement": { "type": "boolean", "description": "Whether the group has reached agreement" },
                "confidence_level": level_schema("Confidence in your current reasoning"),
                "key_evidence": { "type": "string", "description": "Key evidence behind your view" }
            },
            "required": ["statement"]
        })
    }

    fn validate(&self, _context: &ValidationContext) -> Result<(), InvalidReason> {
        if self.statement.trim().is_empty() {
            return Err(InvalidReason::MissingField("statement"));
        }
        check_range("confidence_level", self.confidence_level, 1, 10)
    }
}

/// A werewolf's choice of tonight's victim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillDecision {
    pub target: ParticipantId,
    pub kill_strategy: String,
    #[serde(default)]
    pub team_coordination: Option<String>,
}

impl DecisionKind for KillDecision {
    const NAME: &'static str = "kill";

    fn schema(candidates: &[ParticipantId]) -> Value {
        json!({
            "type": "object",
            "properties": {
                "target": candidate_schema(candidates),
                "kill_strategy": { "type": "string", "description": "Why this target" },
                "team_coordination": { "type": "string", "description": "Plan with your pack" }
            },
            "required": ["target", "kill_strategy"]
        })
    }

    fn validate(&self, context: &ValidationContext) -> Result<(), InvalidReason> {
        context.check_target("target", &self.target)
    }

    fn target(&self) -> Option<&ParticipantId> {
        Some(&self.target)
    }
}

/// The seer's inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectDecision {
    pub target: ParticipantId,
    pub check_reason: String,
    pub priority_level: i64,
}

impl DecisionKind for InspectDecision {
    const NAME: &'static str = "inspect";

    fn schema(candidates: &[ParticipantId]) -> Value {
        json!({
            "type": "object",
            "properties": {
                "target": candidate_schema(candidates),
                "check_reason": { "type": "string", "description": "Why inspect this participant" },
                "priority_level": level_schema("How urgent this inspection is")
            },
            "required": ["target", "check_reason", "priority_level"]
        })
    }

    fn validate(&self, context: &ValidationContext) -> Result<(), InvalidReason> {
        context.check_target("target", &self.target)?;
        check_range("priority_level", self.priority_level, 1, 10)
    }

    fn target(&self) -> Option<&ParticipantId> {
        Some(&self.target)
    }
}

/// The guardian's protection for tonight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardDecision {
    pub target: ParticipantId,
    #[serde(default)]
    pub reason: Option<String>,
}

impl DecisionKind for GuardDecision {
    const NAME: &'static str = "guard";

    fn schema(candidates: &[ParticipantId]) -> Value {
        json!({
            "type": "object",
            "properties": {
                "target": candidate_schema(candidates),
                "reason": { "type": "string" }
            },
            "required": ["target"]
        })
    }

    fn validate(&self, context: &ValidationContext) -> Result<(), InvalidReason> {
        context.check_target("target", &self.target)
    }

    fn target(&self) -> Option<&ParticipantId> {
        Some(&self.target)
    }
}

/// The witch's potions for tonight.
///
/// The antidote always applies to tonight's victim, so `target_name` is only
/// required when poisoning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WitchDecision {
    #[serde(default)]
    pub use_antidote: bool,
    #[serde(default)]
    pub use_poison: bool,
    #[serde(default)]
    pub target_name: Option<ParticipantId>,
    #[serde(default)]
    pub action_reason: Option<String>,
}

impl WitchDecision {
    /// The poison target, when poisoning was requested
    pub fn poison_target(&self) -> Option<&ParticipantId> {
        if self.use_poison {
            self.target_name.as_ref()
        } else {
            None
        }
    }
}

impl DecisionKind for WitchDecision {
    const NAME: &'static str = "witch";

    fn schema(candidates: &[ParticipantId]) -> Value {
        json!({
            "type": "object",
            "properties": {
                "use_antidote": { "type": "boolean", "description": "Revive tonight's victim" },
                "use_poison": { "type": "boolean", "description": "Poison target_name" },
                "target_name": candidate_schema(candidates),
                "action_reason": { "type": "string" }
            },
            "required": []
        })
    }

    fn validate(&self, context: &ValidationContext) -> Result<(), InvalidReason> {
        if self.use_poison {
            let target = self
                .target_name
                .as_ref()
                .ok_or(InvalidReason::MissingField("target_name"))?;
            context.check_target("target_name", target)?;
        }
        Ok(())
    }
}

/// A day-time elimination vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteDecision {
    pub vote: ParticipantId,
    pub reason: String,
    pub suspicion_level: i64,
}

impl DecisionKind for VoteDecision {
    const NAME: &'static str = "vote";

    fn schema(candidates: &[ParticipantId]) -> Value {
        json!({
            "type": "object",
            "properties": {
                "vote": candidate_schema(candidates),
                "reason": { "type": "string", "description": "Briefly, why this participant" },
                "suspicion_level": level_schema("How suspicious this participant is")
            },
            "required": ["vote", "reason", "suspicion_level"]
        })
    }

    fn validate(&self, context: &ValidationContext) -> Result<(), InvalidReason> {
        context.check_target("vote", &self.vote)?;
        check_range("suspicion_level", self.suspicion_level, 1, 10)
    }

    fn target(&self) -> Option<&ParticipantId> {
        Some(&self.vote)
    }
}

/// The hunter's last shot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootDecision {
    pub shoot: bool,
    #[serde(default)]
    pub target: Option<ParticipantId>,
    #[serde(default)]
    pub shoot_reason: Option<String>,
}

impl DecisionKind for ShootDecision {
    const NAME: &'static str = "shoot";

    fn schema(candidates: &[ParticipantId]) -> Value {
        json!({
            "type": "object",
            "properties": {
                "shoot": { "type": "boolean", "description": "Whether to fire" },
                "target": candidate_schema(candidates),
                "shoot_reason": { "type": "string" }
            },
            "required": ["shoot"]
        })
    }

    fn validate(&self, context: &ValidationContext) -> Result<(), InvalidReason> {
        if self.shoot {
            let target = self
                .target
                .as_ref()
                .ok_or(InvalidReason::MissingField("target"))?;
            context.check_target("target", target)?;
        }
        Ok(())
    }

    fn target(&self) -> Option<&ParticipantId> {
        if self.shoot { self.target.as_ref() } else { None }
    }
}
