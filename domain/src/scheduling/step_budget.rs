//! Step budget and termination decisions

use serde::{Deserialize, Serialize};

/// Maximum number of turns before forced termination.
///
/// Always at least 1; smaller requests are coerced up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepBudget {
    max_steps: u64,
    coerced: bool,
}

impl StepBudget {
    pub fn new(requested: i64) -> Self {
        if requested < 1 {
            Self {
                max_steps: 1,
                coerced: true,
            }
        } else {
            Self {
                max_steps: requested as u64,
                coerced: false,
            }
        }
    }

    pub fn max_steps(&self) -> u64 {
        self.max_steps
    }

    /// Whether the requested value was replaced by the minimum of 1
    pub fn was_coerced(&self) -> bool {
        self.coerced
    }

    pub fn is_exhausted(&self, step_count: u64) -> bool {
        step_count >= self.max_steps
    }
}

/// Outcome of one termination check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationDecision {
    Continue,
    ConclusionReached,
    StepBudgetExhausted,
}

impl TerminationDecision {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TerminationDecision::Continue)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationDecision::Continue => "continue",
            TerminationDecision::ConclusionReached => "conclusion_reached",
            TerminationDecision::StepBudgetExhausted => "step_budget_exhausted",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TerminationDecision::Continue => "Continue",
            TerminationDecision::ConclusionReached => "Conclusion reached",
            TerminationDecision::StepBudgetExhausted => "Step budget exhausted",
        }
    }
}

impl std::fmt::Display for TerminationDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
