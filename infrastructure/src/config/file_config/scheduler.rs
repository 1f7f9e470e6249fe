//! Scheduler configuration from TOML (`[scheduler]` section)
//!
//! ```toml
//! [scheduler]
//! strategy = "balanced"       # or "delegating"
//! max_steps = 30
//!
//! [scheduler.target_share]    # optional, derived from the roster when omitted
//! PM = 0.4
//! Analyst = 0.35
//! Critic = 0.25
//! ```

use floor_domain::SelectionStrategy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSchedulerConfig {
    /// Selection strategy: "balanced" or "delegating"
    pub strategy: String,
    /// Step budget; values below 1 are coerced to 1 at construction
    pub max_steps: i64,
    /// Explicit target shares keyed by participant name
    pub target_share: Option<HashMap<String, f64>>,
}

impl Default for FileSchedulerConfig {
    fn default() -> Self {
        Self {
            strategy: "balanced".to_string(),
            max_steps: 12,
            target_share: None,
        }
    }
}

impl FileSchedulerConfig {
    /// Parse the strategy string
    pub fn parse_strategy(&self) -> Result<SelectionStrategy, String> {
        self.strategy.parse()
    }
}
