//! Conclusion value object

use serde::{Deserialize, Serialize};

/// The final conclusion of a conversation (Value Object)
///
/// Set by the surrounding system (usually the acting participant) to signal
/// that the conversation is logically complete. The scheduler only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conclusion {
    summary: String,
}

impl Conclusion {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }
}

impl std::fmt::Display for Conclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary)
    }
}
