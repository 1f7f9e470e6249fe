//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_state;
pub mod decision_logger;
pub mod participant_actor;
