//! Port for structured scheduling-decision logging.
//!
//! Defines the [`DecisionLogger`] trait for recording scheduler events
//! (speaker selections, termination checks, resets) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures every
//! decision in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured decision event for logging.
pub struct DecisionEvent {
    /// Event type identifier (e.g., "speaker_selected", "termination_check").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DecisionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging decision events to a structured log.
///
/// The `log` method is synchronous and non-fallible so that a logging
/// failure can never stall the conversation loop.
pub trait DecisionLogger: Send + Sync {
    /// Record a decision event.
    fn log(&self, event: DecisionEvent);
}

/// No-op implementation for tests and when decision logging is disabled.
pub struct NoDecisionLogger;

impl DecisionLogger for NoDecisionLogger {
    fn log(&self, _event: DecisionEvent) {}
}
