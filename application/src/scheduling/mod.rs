//! Turn-scheduling policies
//!
//! Three cooperating policies decide who speaks next and when the
//! conversation stops:
//!
//! - [`StepBudgetTermination`] — stops on a conclusion or when the step budget runs out
//! - [`DelegatingSelection`] — override if present, otherwise the default participant
//! - [`BalancedSelection`] — override if present, otherwise fairness scoring
//!
//! All policies read the same [`ConversationStatePort`](crate::ports::conversation_state::ConversationStatePort)
//! instance and are driven strictly sequentially by one conversation loop:
//! `select` for turn *n*, then `should_terminate` for turn *n*, then `select`
//! for turn *n + 1*. Policies take `&mut self`, so a single instance cannot
//! be driven by two callers at once. Policy instances must not be shared
//! between conversations.

pub mod balanced;
pub mod delegating;
pub mod state_access;
pub mod termination;

#[cfg(test)]
pub(crate) mod test_support;

pub use balanced::BalancedSelection;
pub use delegating::DelegatingSelection;
pub use termination::StepBudgetTermination;

use async_trait::async_trait;
use floor_domain::{Participant, SchedulerError, TerminationDecision, TurnRecord};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_POLICY_SEQ: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a policy instance, used in log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolicyId {
    kind: &'static str,
    seq: u64,
}

impl PolicyId {
    pub fn next(kind: &'static str) -> Self {
        Self {
            kind,
            seq: NEXT_POLICY_SEQ.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl std::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind, self.seq)
    }
}

/// Why a participant was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionReason {
    /// An external designation forced this turn
    Override,
    /// Won the fairness scoring with this score
    Scored { score: f64 },
    /// No override and nothing to score: the default participant
    Fallback,
}

impl SelectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionReason::Override => "override",
            SelectionReason::Scored { .. } => "scored",
            SelectionReason::Fallback => "fallback",
        }
    }
}

/// A selection decision.
#[derive(Debug, Clone)]
pub struct Selection<P> {
    pub participant: P,
    pub reason: SelectionReason,
}

impl<P> Selection<P> {
    pub fn new(participant: P, reason: SelectionReason) -> Self {
        Self {
            participant,
            reason,
        }
    }
}

/// Decides which participant speaks next.
#[async_trait]
pub trait SpeakerSelector<P: Participant + Clone + 'static>: Send {
    fn id(&self) -> PolicyId;

    /// Choose the next speaker and report why.
    async fn select(
        &mut self,
        roster: &[P],
        history: &[TurnRecord],
    ) -> Result<Selection<P>, SchedulerError>;

    /// Choose the next speaker.
    async fn next(&mut self, roster: &[P], history: &[TurnRecord]) -> Result<P, SchedulerError> {
        self.select(roster, history)
            .await
            .map(|selection| selection.participant)
    }

    /// Forget per-conversation state and drain any pending override.
    async fn reset(&mut self);
}

/// Decides whether the conversation must stop.
#[async_trait]
pub trait TerminationPolicy: Send {
    fn id(&self) -> PolicyId;

    /// Count one step and decide whether to continue.
    async fn decide(
        &mut self,
        acting: &dyn Participant,
        history: &[TurnRecord],
    ) -> TerminationDecision;

    /// Count one step and return `true` if the conversation must end.
    async fn should_terminate(&mut self, acting: &dyn Participant, history: &[TurnRecord]) -> bool {
        self.decide(acting, history).await.is_terminal()
    }

    /// Reset the step counter.
    async fn reset(&mut self);
}
