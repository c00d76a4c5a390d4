//! Model value object naming the oracle behind a participant

use serde::{Deserialize, Serialize};

/// Identifier of the decision oracle a participant is played by (Value Object)
///
/// The domain treats it as opaque: adapters decide what the string means
/// (an OpenAI-compatible model name, `"random"` for the offline bot, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Model {
    /// The offline random oracle
    fn default() -> Self {
        Model::new("random")
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Model::new(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_random() {
        assert_eq!(Model::default().as_str(), "random");
    }

    #[test]
    fn test_parse_trims() {
        let model: Model = " gpt-4o-mini ".parse().unwrap();
        assert_eq!(model, Model::new("gpt-4o-mini"));
        assert_eq!(model.to_string(), "gpt-4o-mini");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Model::new("qwen-plus")).unwrap();
        assert_eq!(json, "\"qwen-plus\"");
    }
}
