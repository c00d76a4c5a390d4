//! Decision oracle port
//!
//! Defines the interface for asking a participant's backing model for a
//! structured decision.

use async_trait::async_trait;
use council_domain::{Model, ParticipantId};
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while asking an oracle
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response contained no JSON object: {0}")]
    NoJson(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One decision request as handed to an oracle
#[derive(Debug, Clone)]
pub struct OracleRequest {
    /// Decision kind name (`"vote"`, `"kill"`, ...)
    pub decision: &'static str,
    pub participant: ParticipantId,
    pub model: Model,
    pub system_prompt: String,
    pub prompt: String,
    /// JSON schema the answer must follow
    pub schema: Value,
    /// Participants the answer may name
    pub candidates: Vec<ParticipantId>,
}

/// Source of structured decisions for participants
///
/// This port defines how the application layer asks for decisions.
/// Implementations (adapters) live in the infrastructure layer. The answer is
/// the raw JSON object; validation happens in the decision collector.
#[async_trait]
pub trait DecisionOracle: Send + Sync {
    async fn request(&self, request: &OracleRequest) -> Result<Value, OracleError>;
}
