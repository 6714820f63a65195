use std::str::FromStr;

use serde::Serialize;
use servicedesk_core::AppError;

/// Where ticket search queries are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Filter the fetched collection in process.
    #[default]
    Local,
    /// Ask the backend search endpoint for every non-blank query.
    Remote,
}

impl SearchMode {
    /// Returns the configuration token.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl FromStr for SearchMode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            _ => Err(AppError::Validation(format!(
                "unknown search mode '{value}', expected 'local' or 'remote'"
            ))),
        }
    }
}
