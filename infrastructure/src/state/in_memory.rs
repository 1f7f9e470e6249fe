//! In-memory shared conversation state.

use async_trait::async_trait;
use floor_application::ports::conversation_state::{ConversationStatePort, StateAccessError};
use floor_domain::{Conclusion, ParticipantName};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

static NEXT_STATE_SEQ: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Default)]
struct Inner {
    next_speaker_override: Option<ParticipantName>,
    final_conclusion: Option<Conclusion>,
}

/// Conversation state held in memory.
///
/// The override slot and the conclusion live behind one async mutex, so the
/// override consume is a single locked take. Each instance belongs to one
/// conversation; create a new instance per concurrent conversation.
#[derive(Debug)]
pub struct InMemoryConversationState {
    id: String,
    inner: Mutex<Inner>,
}

impl InMemoryConversationState {
    /// Create a state with a generated id (`conversation-N`).
    pub fn new() -> Self {
        let seq = NEXT_STATE_SEQ.fetch_add(1, Ordering::Relaxed);
        Self::with_id(format!("conversation-{}", seq))
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inner: Mutex::new(Inner::default()),
        }
    }
}

impl Default for InMemoryConversationState {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStatePort for InMemoryConversationState {
    fn id(&self) -> &str {
        &self.id
    }

    async fn consume_next_speaker_override(
        &self,
    ) -> Result<Option<ParticipantName>, StateAccessError> {
        Ok(self.inner.lock().await.next_speaker_override.take())
    }

    async fn designate_next_speaker(&self, name: ParticipantName) -> Result<(), StateAccessError> {
        let mut inner = self.inner.lock().await;
        if let Some(previous) = inner.next_speaker_override.replace(name) {
            debug!(
                "[state={}] Replacing pending designation of {}",
                self.id, previous
            );
        }
        Ok(())
    }

    async fn final_conclusion(&self) -> Result<Option<Conclusion>, StateAccessError> {
        Ok(self.inner.lock().await.final_conclusion.clone())
    }

    async fn set_final_conclusion(&self, conclusion: Conclusion) -> Result<(), StateAccessError> {
        self.inner.lock().await.final_conclusion = Some(conclusion);
        Ok(())
    }

    async fn clear_final_conclusion(&self) -> Result<(), StateAccessError> {
        self.inner.lock().await.final_conclusion = None;
        Ok(())
    }
}
