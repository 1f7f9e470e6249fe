//! Core domain concepts shared across the scheduler.
//!
//! - [`participant::Participant`] — the capability set the scheduler needs from a speaker
//! - [`participant::ParticipantName`] — a validated participant name
//! - [`turn::TurnRecord`] — one entry of visible conversation history
//! - [`conclusion::Conclusion`] — the "conversation is done" signal
//! - [`error::SchedulerError`] — domain-level errors

pub mod conclusion;
pub mod error;
pub mod participant;
pub mod turn;
