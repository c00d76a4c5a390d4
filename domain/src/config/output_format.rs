//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished game is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every public announcement as it happens, then the report (default)
    #[default]
    Full,
    /// Only the final report: outcome, rounds and roles
    Summary,
    /// The report as a JSON document
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(OutputFormat::Full),
            "summary" => Ok(OutputFormat::Summary),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Invalid output format: {}. Valid: full, summary, json",
                other
            )),
        }
    }
}
