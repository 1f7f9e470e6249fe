//! Domain layer for floor-control
//!
//! This crate contains the vocabulary and the fairness math of the turn
//! scheduler. It has no dependencies on infrastructure, logging or async
//! concerns.
//!
//! # Core Concepts
//!
//! ## Participants and rosters
//!
//! A participant is anything with a unique name. A [`Roster`] is a validated,
//! ordered set of participants; its order is the final tie-break for selection.
//!
//! ## Fairness
//!
//! - **Target share**: the long-run fraction of turns a participant should get
//! - **Participation ledger**: counts, recency and imbalance budget per participant
//! - **Imbalance budget**: credit banked for participants shorted by an override
//!
//! ## Termination
//!
//! A [`StepBudget`] bounds conversation length in turns; a [`Conclusion`]
//! ends it early.

pub mod core;
pub mod scheduling;

// Re-export commonly used types
pub use core::{
    conclusion::Conclusion,
    error::SchedulerError,
    participant::{DefaultResolution, NamedParticipant, Participant, ParticipantName, Roster},
    turn::TurnRecord,
};
pub use scheduling::{
    ParticipantStats, ParticipationLedger, SHARE_TOLERANCE, ScoredCandidate, SelectionStrategy,
    StepBudget, TargetShares, TerminationDecision,
};
