//! Shared conversation state port
//!
//! The conversation state is owned outside the scheduler. It exposes a
//! single-slot "next speaker override" and a "final conclusion" value:
//!
//! ```text
//!   external actor ── designate_next_speaker("X") ──►  [override slot]
//!                                                          │
//!   selection policy ◄── consume_next_speaker_override ────┘  (read-then-clear)
//!
//!   acting participant ── set_final_conclusion ──►  [conclusion]
//!                                                       │
//!   termination policy ◄── final_conclusion ────────────┘  (read only)
//! ```
//!
//! # Architecture
//!
//! - **Port**: [`ConversationStatePort`] - defined here in application layer
//! - **Adapter**: `InMemoryConversationState` - implemented in infrastructure layer
//!
//! Reads are fallible. Policies treat a failed read as "absent" and log it;
//! see [`crate::scheduling::state_access`].
//!
//! One state instance belongs to exactly one conversation. Sharing a state
//! between concurrently running conversations is unsupported.

use async_trait::async_trait;
use floor_domain::{Conclusion, ParticipantName};
use thiserror::Error;

/// Errors from reading or writing the shared state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateAccessError {
    #[error("State unavailable: {0}")]
    Unavailable(String),

    #[error("State lock poisoned")]
    Poisoned,

    #[error("Operation not supported by this state: {0}")]
    Unsupported(&'static str),
}

/// Capabilities a state object advertises.
///
/// Policies check these at construction and refuse states that cannot
/// serve them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCapabilities {
    /// `consume_next_speaker_override` is implemented
    pub consume_override: bool,
    /// `final_conclusion` is implemented
    pub read_conclusion: bool,
}

impl StateCapabilities {
    pub const fn full() -> Self {
        Self {
            consume_override: true,
            read_conclusion: true,
        }
    }
}

impl Default for StateCapabilities {
    fn default() -> Self {
        Self::full()
    }
}

/// Port for the shared conversation state.
#[async_trait]
pub trait ConversationStatePort: Send + Sync {
    /// Identifier used in log context
    fn id(&self) -> &str;

    /// Capabilities this state supports
    fn capabilities(&self) -> StateCapabilities {
        StateCapabilities::full()
    }

    /// Read and clear the override slot in one step.
    ///
    /// Returns `Ok(None)` when nothing is designated; safe to call repeatedly.
    async fn consume_next_speaker_override(
        &self,
    ) -> Result<Option<ParticipantName>, StateAccessError>;

    /// Force the next turn's speaker. Replaces any pending designation.
    async fn designate_next_speaker(&self, name: ParticipantName) -> Result<(), StateAccessError>;

    /// Current conclusion, if the conversation has reached one
    async fn final_conclusion(&self) -> Result<Option<Conclusion>, StateAccessError>;

    /// Record a conclusion. Called by the surrounding system, never by policies.
    async fn set_final_conclusion(&self, conclusion: Conclusion) -> Result<(), StateAccessError>;

    /// Clear the conclusion between runs.
    async fn clear_final_conclusion(&self) -> Result<(), StateAccessError>;
}
