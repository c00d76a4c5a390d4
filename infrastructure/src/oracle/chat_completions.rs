//! OpenAI-compatible chat completions oracle
//!
//! Works with any endpoint that speaks `/chat/completions` (OpenAI,
//! OpenRouter, DashScope compatible mode, Ollama, vLLM). The reply text is
//! searched for a JSON object; validation happens in the application layer.

use async_trait::async_trait;
use council_application::{DecisionOracle, OracleError, OracleRequest};
use council_domain::extract_json_object;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

/// Longest reply excerpt kept in a `NoJson` error
const EXCERPT_LEN: usize = 200;

/// Connection settings for [`ChatCompletionsOracle`]
#[derive(Debug, Clone)]
pub struct ChatOracleSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// HTTP-level timeout; the decision collector applies its own as well
    pub request_timeout: Duration,
}

impl Default for ChatOracleSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            temperature: 0.7,
            max_tokens: 1024,
            request_timeout: Duration::from_secs(180),
        }
    }
}

impl ChatOracleSettings {
    /// Read the API key from the named environment variable
    pub fn with_api_key_env(mut self, var: &str) -> Self {
        self.api_key = std::env::var(var).ok().filter(|k| !k.trim().is_empty());
        self
    }
}

/// Decision oracle backed by an OpenAI-compatible HTTP API
pub struct ChatCompletionsOracle {
    client: reqwest::Client,
    settings: ChatOracleSettings,
}

impl ChatCompletionsOracle {
    pub fn new(mut settings: ChatOracleSettings) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| OracleError::ConnectionError(e.to_string()))?;
        settings.base_url = settings.base_url.trim_end_matches('/').to_string();
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url)
    }

    fn body(&self, request: &OracleRequest) -> Value {
        json!({
            "model": request.model.as_str(),
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.prompt },
            ],
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
            "stream": false,
        })
    }
}

/// Pull the decision object out of a chat completions response body
fn decision_from_response(response: &Value) -> Result<Value, OracleError> {
    let content = response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| OracleError::RequestFailed("No choices in response".to_string()))?;

    extract_json_object(content).ok_or_else(|| {
        let excerpt: String = content.chars().take(EXCERPT_LEN).collect();
        OracleError::NoJson(excerpt)
    })
}

#[async_trait]
impl DecisionOracle for ChatCompletionsOracle {
    async fn request(&self, request: &OracleRequest) -> Result<Value, OracleError> {
        debug!(
            participant = %request.participant,
            model = %request.model,
            decision = request.decision,
            "Sending chat completion request"
        );

        let mut http = self.client.post(self.endpoint()).json(&self.body(request));
        if let Some(key) = &self.settings.api_key {
            http = http.bearer_auth(key);
        }

        let response = http.send().await.map_err(|e| {
            if e.is_timeout() {
                OracleError::Timeout
            } else {
                OracleError::ConnectionError(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(OracleError::ModelNotAvailable(request.model.to_string()));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %error_body, "Oracle returned error");
            return Err(OracleError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| OracleError::RequestFailed(format!("Failed to parse response: {e}")))?;
        decision_from_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::Model;

    fn request() -> OracleRequest {
        OracleRequest {
            decision: "vote",
            participant: "Liu Bei".into(),
            model: Model::new("qwen-plus"),
            system_prompt: "You are Liu Bei.".to_string(),
            prompt: "Vote.".to_string(),
            schema: json!({"type": "object"}),
            candidates: vec!["Cao Cao".into()],
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let oracle = ChatCompletionsOracle::new(ChatOracleSettings {
            base_url: "http://localhost:11434/v1/".to_string(),
            ..ChatOracleSettings::default()
        })
        .unwrap();
        assert_eq!(oracle.endpoint(), "http://localhost:11434/v1/chat/completions");
    }

    #[test]
    fn test_body_carries_both_prompts() {
        let oracle = ChatCompletionsOracle::new(ChatOracleSettings::default()).unwrap();
        let body = oracle.body(&request());
        assert_eq!(body["model"], "qwen-plus");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are Liu Bei.");
        assert_eq!(body["messages"][1]["content"], "Vote.");
        assert_eq!(body["stream"], false);
    }

    #[test]
    fn test_decision_from_fenced_reply() {
        let response = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "Here is my vote:\n```json\n{\"vote\": \"Cao Cao\", \"reason\": \"shifty\"}\n```"
                }
            }]
        });
        let decision = decision_from_response(&response).unwrap();
        assert_eq!(decision["vote"], "Cao Cao");
    }

    #[test]
    fn test_reply_without_json() {
        let response = json!({
            "choices": [{ "message": { "content": "I abstain." } }]
        });
        assert!(matches!(
            decision_from_response(&response),
            Err(OracleError::NoJson(text)) if text == "I abstain."
        ));
    }

    #[test]
    fn test_response_without_choices() {
        let response = json!({ "choices": [] });
        assert!(matches!(
            decision_from_response(&response),
            Err(OracleError::RequestFailed(_))
        ));
    }
}
