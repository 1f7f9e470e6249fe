//! Domain error types

use thiserror::Error;

/// Errors raised by the turn scheduler.
///
/// Configuration errors surface at construction time. Per-turn state access
/// faults never reach this type: they are absorbed by the policies and logged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("Roster is empty: at least one participant is required")]
    EmptyRoster,

    #[error("Duplicate participant name in roster: {0}")]
    DuplicateParticipant(String),

    #[error("Participant name cannot be empty (roster position {0})")]
    InvalidParticipantName(usize),

    #[error("Target share references unknown participant: {0}")]
    UnknownTargetShareParticipant(String),

    #[error("Invalid target share for {name}: {value}")]
    InvalidTargetShare { name: String, value: f64 },

    #[error("Target shares must sum to 1.0 (±{tolerance}), got {sum}")]
    TargetShareSum { sum: f64, tolerance: f64 },

    #[error("Conversation state is missing a required capability: {0}")]
    MissingStateCapability(&'static str),

    #[error("No participant available to take the next turn")]
    NoParticipantAvailable,

    #[error("Operation cancelled")]
    Cancelled,
}

impl SchedulerError {
    /// Whether this error is a construction-time configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SchedulerError::EmptyRoster
                | SchedulerError::DuplicateParticipant(_)
                | SchedulerError::InvalidParticipantName(_)
                | SchedulerError::UnknownTargetShareParticipant(_)
                | SchedulerError::InvalidTargetShare { .. }
                | SchedulerError::TargetShareSum { .. }
                | SchedulerError::MissingStateCapability(_)
        )
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SchedulerError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = SchedulerError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_configuration_classification() {
        assert!(SchedulerError::EmptyRoster.is_configuration());
        assert!(SchedulerError::DuplicateParticipant("PM".to_string()).is_configuration());
        assert!(
            SchedulerError::TargetShareSum {
                sum: 0.5,
                tolerance: 0.01
            }
            .is_configuration()
        );
        assert!(SchedulerError::MissingStateCapability("consume_override").is_configuration());
        assert!(!SchedulerError::NoParticipantAvailable.is_configuration());
        assert!(!SchedulerError::Cancelled.is_configuration());
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(SchedulerError::Cancelled.is_cancelled());
        assert!(!SchedulerError::EmptyRoster.is_cancelled());
    }
}
