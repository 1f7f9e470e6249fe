//! Console output formatter for conversation outcomes

use crate::cli::commands::OutputFormat;
use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use floor_application::{ConversationOutcome, SelectionReason};
use floor_domain::TerminationDecision;

/// Formats conversation outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format according to the requested output format
    pub fn render(outcome: &ConversationOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(outcome),
            OutputFormat::Summary => Self::format_summary(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Format the complete outcome
    pub fn format(outcome: &ConversationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Conversation"));
        output.push('\n');

        output.push_str(&Self::section_header("Turns"));
        for (record, decision) in outcome.transcript.iter().zip(&outcome.decisions) {
            output.push_str(&format!(
                "\n{} {}\n",
                format!("── Turn {}: {} ──", record.turn, record.speaker)
                    .yellow()
                    .bold(),
                Self::reason_label(&decision.reason).dimmed()
            ));
            if !record.content.is_empty() {
                output.push_str(&Self::indent(&record.content, "  "));
                output.push('\n');
            }
        }

        output.push_str(&Self::participation_section(outcome));
        output.push_str(&Self::result_section(outcome));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &ConversationOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format participation and result only (concise output)
    pub fn format_summary(outcome: &ConversationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Conversation Summary ===".cyan().bold()
        ));

        output.push_str(&format!(
            "{} {}\n",
            "Speakers:".bold(),
            outcome
                .transcript
                .iter()
                .map(|r| r.speaker.as_str())
                .collect::<Vec<_>>()
                .join(" → ")
        ));
        output.push_str(&Self::participation_section(outcome));
        output.push_str(&Self::result_section(outcome));

        output
    }

    fn participation_section(outcome: &ConversationOutcome) -> String {
        let mut output = Self::section_header("Participation");
        let total = outcome.turns().max(1) as f64;
        let width = outcome
            .participation
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0);

        for (name, count) in &outcome.participation {
            output.push_str(&format!(
                "  {:<width$}  {:>3}  {:>5.1}%\n",
                name,
                count,
                *count as f64 / total * 100.0,
                width = width
            ));
        }
        output
    }

    fn result_section(outcome: &ConversationOutcome) -> String {
        let mut output = Self::section_header("Result");
        let status = match outcome.termination {
            TerminationDecision::ConclusionReached => {
                outcome.termination.display_name().green().bold()
            }
            TerminationDecision::StepBudgetExhausted => {
                outcome.termination.display_name().yellow().bold()
            }
            TerminationDecision::Continue => outcome.termination.display_name().normal(),
        };
        output.push_str(&format!(
            "  {} after {} turn(s)\n",
            status,
            outcome.turns()
        ));
        if let Some(conclusion) = &outcome.conclusion {
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Conclusion:".cyan().bold(),
                Self::indent(conclusion.summary(), "  ")
            ));
        }
        output
    }

    fn reason_label(reason: &SelectionReason) -> String {
        match reason {
            SelectionReason::Override => "(designated)".to_string(),
            SelectionReason::Scored { score } => format!("(score {:.3})", score),
            SelectionReason::Fallback => "(default)".to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &ConversationOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &ConversationOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_summary(&self, outcome: &ConversationOutcome) -> String {
        Self::format_summary(outcome)
    }
}
