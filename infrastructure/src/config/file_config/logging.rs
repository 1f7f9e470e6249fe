//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving one record per scheduling decision
    pub decision_log: Option<String>,
}
