//! Conversation roster configuration from TOML (`[conversation]` section)
//!
//! ```toml
//! [conversation]
//! participants = ["PM", "Analyst", "Critic"]
//! default_participant = "PM"
//! ```

use serde::{Deserialize, Serialize};

/// Roster configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConversationConfig {
    /// Participant names in tie-break order
    pub participants: Vec<String>,
    /// Participant who opens and receives delegated turns
    pub default_participant: Option<String>,
}
