//! Output formatter trait

use floor_application::ConversationOutcome;

/// Trait for formatting conversation outcomes
pub trait OutputFormatter {
    /// Format the complete outcome
    fn format(&self, outcome: &ConversationOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &ConversationOutcome) -> String;

    /// Format participation and result only (concise output)
    fn format_summary(&self, outcome: &ConversationOutcome) -> String;
}
