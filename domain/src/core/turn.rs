//! Conversation turn records

use super::participant::ParticipantName;
use serde::{Deserialize, Serialize};

/// One entry of the visible conversation history.
///
/// The scheduler only looks at how many records exist and who spoke; the
/// content is carried for the surrounding system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based turn number
    pub turn: usize,
    pub speaker: ParticipantName,
    pub content: String,
}

impl TurnRecord {
    pub fn new(turn: usize, speaker: ParticipantName, content: impl Into<String>) -> Self {
        Self {
            turn,
            speaker,
            content: content.into(),
        }
    }
}
