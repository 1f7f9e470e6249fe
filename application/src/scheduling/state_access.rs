//! Fail-open access to the shared conversation state
//!
//! A scheduling decision must always produce a result. State reads therefore
//! go through [`fail_open`], which turns a faulted read into "absent" and logs
//! it with the policy, state and turn that observed the fault.

use super::PolicyId;
use crate::ports::conversation_state::{ConversationStatePort, StateAccessError};
use floor_domain::{Conclusion, ParticipantName, SchedulerError};
use tracing::warn;

/// Log context for a single decision.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub policy: PolicyId,
    pub state_id: &'a str,
    pub turn: u64,
}

impl std::fmt::Display for DecisionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "policy={} state={} turn={}",
            self.policy, self.state_id, self.turn
        )
    }
}

/// Treat a faulted read as absent, logging the fault.
pub fn fail_open<T>(
    result: Result<Option<T>, StateAccessError>,
    ctx: &DecisionContext<'_>,
    what: &str,
) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("[{}] Failed to read {}, treating as absent: {}", ctx, what, e);
            None
        }
    }
}

/// Consume the override slot, failing open.
pub async fn consume_override(
    state: &dyn ConversationStatePort,
    ctx: &DecisionContext<'_>,
) -> Option<ParticipantName> {
    fail_open(
        state.consume_next_speaker_override().await,
        ctx,
        "next-speaker override",
    )
}

/// Read the conclusion, failing open.
pub async fn read_conclusion(
    state: &dyn ConversationStatePort,
    ctx: &DecisionContext<'_>,
) -> Option<Conclusion> {
    fail_open(state.final_conclusion().await, ctx, "final conclusion")
}

/// Which capabilities a policy needs from the state.
#[derive(Debug, Clone, Copy)]
pub struct RequiredCapabilities {
    pub consume_override: bool,
    pub read_conclusion: bool,
}

/// Reject a state that cannot serve the policy.
pub fn ensure_capabilities(
    state: &dyn ConversationStatePort,
    required: RequiredCapabilities,
) -> Result<(), SchedulerError> {
    let available = state.capabilities();
    if required.consume_override && !available.consume_override {
        return Err(SchedulerError::MissingStateCapability(
            "consume_next_speaker_override",
        ));
    }
    if required.read_conclusion && !available.read_conclusion {
        return Err(SchedulerError::MissingStateCapability("final_conclusion"));
    }
    Ok(())
}
