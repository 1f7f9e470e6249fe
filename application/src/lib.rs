//! Application layer for floor-control
//!
//! This crate contains the scheduling policies, port definitions, the
//! conversation-loop use case, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod scheduling;
pub mod use_cases;

// Re-export commonly used types
pub use config::SchedulerParams;
pub use ports::{
    conversation_state::{ConversationStatePort, StateAccessError, StateCapabilities},
    decision_logger::{DecisionEvent, DecisionLogger, NoDecisionLogger},
    participant_actor::{ActorError, ParticipantActor},
};
pub use scheduling::{
    BalancedSelection, DelegatingSelection, PolicyId, Selection, SelectionReason,
    SpeakerSelector, StepBudgetTermination, TerminationPolicy,
};
pub use use_cases::run_conversation::{
    ConversationOutcome, RunConversationError, RunConversationInput, RunConversationUseCase,
    TurnDecision,
};
