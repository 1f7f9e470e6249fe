//! Run Conversation use case
//!
//! Drives one round-based conversation with the scheduling policies:
//!
//! ```text
//! ┌─► selector.select(roster, history)
//! │        ↓
//! │   actor.act(participant, history, state)
//! │        ↓
//! │   history.push(turn record)
//! │        ↓
//! └── termination.decide(participant, history) ── terminal ──► outcome
//! ```
//!
//! Calls are strictly sequential. Cancellation is only checked between turns;
//! a decision in flight always completes.

use crate::ports::conversation_state::ConversationStatePort;
use crate::ports::decision_logger::{DecisionEvent, DecisionLogger, NoDecisionLogger};
use crate::ports::participant_actor::{ActorError, ParticipantActor};
use crate::scheduling::{SelectionReason, SpeakerSelector, TerminationPolicy};
use crate::use_cases::shared::check_cancelled;
use floor_domain::{
    Conclusion, Participant, ParticipantName, SchedulerError, TerminationDecision, TurnRecord,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur while running a conversation
#[derive(Error, Debug)]
pub enum RunConversationError {
    #[error("Scheduling failed: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("Participant failed to act: {0}")]
    Actor(#[from] ActorError),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Input for the RunConversation use case
pub struct RunConversationInput<P> {
    /// Participants eligible for this conversation, in tie-break order
    pub roster: Vec<P>,
    pub cancellation_token: Option<CancellationToken>,
}

impl<P> RunConversationInput<P> {
    pub fn new(roster: Vec<P>) -> Self {
        Self {
            roster,
            cancellation_token: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }
}

/// One scheduling decision as it happened.
#[derive(Debug, Clone, Serialize)]
pub struct TurnDecision {
    pub turn: usize,
    pub speaker: ParticipantName,
    pub reason: SelectionReason,
    pub termination: TerminationDecision,
}

/// Result of a finished conversation
#[derive(Debug, Clone, Serialize)]
pub struct ConversationOutcome {
    pub transcript: Vec<TurnRecord>,
    pub decisions: Vec<TurnDecision>,
    pub termination: TerminationDecision,
    pub conclusion: Option<Conclusion>,
    /// `(name, turns taken)` in roster order
    pub participation: Vec<(String, usize)>,
}

impl ConversationOutcome {
    pub fn turns(&self) -> usize {
        self.transcript.len()
    }
}

/// Use case for running a scheduled conversation
pub struct RunConversationUseCase<P: Participant + Clone + 'static> {
    selector: Box<dyn SpeakerSelector<P>>,
    termination: Box<dyn TerminationPolicy>,
    actor: Arc<dyn ParticipantActor<P>>,
    state: Arc<dyn ConversationStatePort>,
    logger: Arc<dyn DecisionLogger>,
}

impl<P: Participant + Clone + 'static> RunConversationUseCase<P> {
    pub fn new(
        selector: Box<dyn SpeakerSelector<P>>,
        termination: Box<dyn TerminationPolicy>,
        actor: Arc<dyn ParticipantActor<P>>,
        state: Arc<dyn ConversationStatePort>,
    ) -> Self {
        Self {
            selector,
            termination,
            actor,
            state,
            logger: Arc::new(NoDecisionLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn DecisionLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Run until the termination policy stops the conversation.
    pub async fn execute(
        &mut self,
        input: RunConversationInput<P>,
    ) -> Result<ConversationOutcome, RunConversationError> {
        info!(
            "Starting conversation on state {} with {} participants (selector {}, termination {})",
            self.state.id(),
            input.roster.len(),
            self.selector.id(),
            self.termination.id()
        );

        let mut history: Vec<TurnRecord> = Vec::new();
        let mut decisions: Vec<TurnDecision> = Vec::new();

        let termination = loop {
            check_cancelled(&input.cancellation_token)?;
            let turn = history.len() + 1;

            let selection = self.selector.select(&input.roster, &history).await?;
            let speaker = ParticipantName::try_new(selection.participant.name())
                .ok_or(SchedulerError::NoParticipantAvailable)?;
            debug!("Turn {}: {} ({})", turn, speaker, selection.reason.as_str());
            self.logger.log(DecisionEvent::new(
                "speaker_selected",
                serde_json::json!({
                    "state": self.state.id(),
                    "policy": self.selector.id().to_string(),
                    "turn": turn,
                    "speaker": speaker.as_str(),
                    "reason": selection.reason,
                }),
            ));

            let content = self
                .actor
                .act(&selection.participant, &history, self.state.as_ref())
                .await?;
            history.push(TurnRecord::new(turn, speaker.clone(), content));

            let decision = self
                .termination
                .decide(&selection.participant, &history)
                .await;
            self.logger.log(DecisionEvent::new(
                "termination_check",
                serde_json::json!({
                    "state": self.state.id(),
                    "policy": self.termination.id().to_string(),
                    "turn": turn,
                    "decision": decision,
                }),
            ));

            decisions.push(TurnDecision {
                turn,
                speaker,
                reason: selection.reason,
                termination: decision,
            });

            if decision.is_terminal() {
                break decision;
            }
        };

        let conclusion = match self.state.final_conclusion().await {
            Ok(conclusion) => conclusion,
            Err(e) => {
                warn!(
                    "Could not read final conclusion from state {}: {}",
                    self.state.id(),
                    e
                );
                None
            }
        };

        let participation = input
            .roster
            .iter()
            .map(|p| {
                let count = history
                    .iter()
                    .filter(|record| record.speaker.as_str() == p.name())
                    .count();
                (p.name().to_string(), count)
            })
            .collect();

        info!(
            "Conversation finished after {} turns: {}",
            history.len(),
            termination
        );

        Ok(ConversationOutcome {
            transcript: history,
            decisions,
            termination,
            conclusion,
            participation,
        })
    }

    /// Reset both policies before reusing them for a new conversation.
    pub async fn reset_all(&mut self) {
        self.selector.reset().await;
        self.termination.reset().await;
        self.logger.log(DecisionEvent::new(
            "policies_reset",
            serde_json::json!({
                "state": self.state.id(),
                "selector": self.selector.id().to_string(),
                "termination": self.termination.id().to_string(),
            }),
        ));
    }
}
