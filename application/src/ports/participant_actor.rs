//! Participant actor port
//!
//! The actor is the collaborator that lets a selected participant take its
//! turn (typically an LLM call in the surrounding system). It may designate
//! the next speaker or set a conclusion through the shared state.

use crate::ports::conversation_state::{ConversationStatePort, StateAccessError};
use async_trait::async_trait;
use floor_domain::{Participant, TurnRecord};
use thiserror::Error;

/// Errors raised while a participant acts
#[derive(Error, Debug)]
pub enum ActorError {
    #[error("Participant {participant} failed: {message}")]
    Failed {
        participant: String,
        message: String,
    },

    #[error("State error: {0}")]
    State(#[from] StateAccessError),
}

/// Port for producing a participant's turn.
#[async_trait]
pub trait ParticipantActor<P: Participant>: Send + Sync {
    /// Let `participant` act and return the message it contributes.
    async fn act(
        &self,
        participant: &P,
        history: &[TurnRecord],
        state: &dyn ConversationStatePort,
    ) -> Result<String, ActorError>;
}
