//! Selection strategy choice

use serde::{Deserialize, Serialize};

/// Which selection policy drives speaker choice.
///
/// - `Delegating`: honor overrides, otherwise always the default participant
/// - `Balanced`: honor overrides, otherwise fairness scoring (default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStrategy {
    Delegating,
    #[default]
    Balanced,
}

impl SelectionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStrategy::Delegating => "delegating",
            SelectionStrategy::Balanced => "balanced",
        }
    }
}

impl std::fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SelectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "delegating" | "delegate" => Ok(SelectionStrategy::Delegating),
            "balanced" | "fair" => Ok(SelectionStrategy::Balanced),
            _ => Err(format!(
                "Unknown selection strategy: {}. Valid: delegating, balanced",
                s
            )),
        }
    }
}
