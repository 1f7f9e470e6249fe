//! Lightweight stand-ins for policy tests.

use crate::ports::conversation_state::{
    ConversationStatePort, StateAccessError, StateCapabilities,
};
use async_trait::async_trait;
use floor_domain::{Conclusion, NamedParticipant, ParticipantName};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory state with switchable read faults.
pub(crate) struct StubState {
    override_slot: Mutex<Option<ParticipantName>>,
    conclusion: Mutex<Option<Conclusion>>,
    fail_reads: AtomicBool,
    capabilities: StateCapabilities,
}

impl StubState {
    pub(crate) fn new() -> Self {
        Self {
            override_slot: Mutex::new(None),
            conclusion: Mutex::new(None),
            fail_reads: AtomicBool::new(false),
            capabilities: StateCapabilities::full(),
        }
    }

    pub(crate) fn with_capabilities(capabilities: StateCapabilities) -> Self {
        Self {
            capabilities,
            ..Self::new()
        }
    }

    /// Make every subsequent read fail
    pub(crate) fn set_failing(&self, failing: bool) {
        self.fail_reads.store(failing, Ordering::SeqCst);
    }

    /// Peek at the override slot without consuming it
    pub(crate) fn pending_override(&self) -> Option<ParticipantName> {
        self.override_slot.lock().unwrap().clone()
    }

    fn check_reads(&self) -> Result<(), StateAccessError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(StateAccessError::Unavailable("injected fault".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ConversationStatePort for StubState {
    fn id(&self) -> &str {
        "stub"
    }

    fn capabilities(&self) -> StateCapabilities {
        self.capabilities
    }

    async fn consume_next_speaker_override(
        &self,
    ) -> Result<Option<ParticipantName>, StateAccessError> {
        self.check_reads()?;
        Ok(self.override_slot.lock().unwrap().take())
    }

    async fn designate_next_speaker(&self, name: ParticipantName) -> Result<(), StateAccessError> {
        *self.override_slot.lock().unwrap() = Some(name);
        Ok(())
    }

    async fn final_conclusion(&self) -> Result<Option<Conclusion>, StateAccessError> {
        self.check_reads()?;
        Ok(self.conclusion.lock().unwrap().clone())
    }

    async fn set_final_conclusion(&self, conclusion: Conclusion) -> Result<(), StateAccessError> {
        *self.conclusion.lock().unwrap() = Some(conclusion);
        Ok(())
    }

    async fn clear_final_conclusion(&self) -> Result<(), StateAccessError> {
        *self.conclusion.lock().unwrap() = None;
        Ok(())
    }
}

pub(crate) fn participants(names: &[&str]) -> Vec<NamedParticipant> {
    names.iter().map(|n| NamedParticipant::new(*n)).collect()
}
