use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned surrogate identifier shared by all three entity types.
pub type Id = i64;

/// Error descriptor returned to clients for every failed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub message: String,
    pub timestamp: String,
}

impl ErrorDetails {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Parse a `yyyy-mm-dd` date literal. Panics on malformed input, so this is
/// only for seed data and tests.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("invalid date literal")
}
