//! Scheduler parameters — policy construction options.
//!
//! [`SchedulerParams`] groups the recognized construction options of the
//! scheduling policies and builds them against a shared state.

use crate::ports::conversation_state::ConversationStatePort;
use crate::scheduling::{
    BalancedSelection, DelegatingSelection, SpeakerSelector, StepBudgetTermination,
};
use floor_domain::{Participant, SchedulerError, SelectionStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Policy construction options.
///
/// | Option | Used by |
/// |--------|---------|
/// | `max_steps` | Termination |
/// | `default_participant` | Both selection policies |
/// | `target_share` | Balanced selection (derived when `None`) |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerParams {
    /// Which selection policy to build
    pub strategy: SelectionStrategy,
    /// Maximum number of turns; values below 1 are coerced to 1
    pub max_steps: i64,
    /// Default participant; `None` means the first roster member
    pub default_participant: Option<String>,
    /// Explicit target shares for balanced selection
    pub target_share: Option<HashMap<String, f64>>,
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            strategy: SelectionStrategy::Balanced,
            max_steps: 12,
            default_participant: None,
            target_share: None,
        }
    }
}

impl SchedulerParams {
    // ==================== Builder Methods ====================

    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_steps(mut self, max_steps: i64) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_default_participant(mut self, name: impl Into<String>) -> Self {
        self.default_participant = Some(name.into());
        self
    }

    pub fn with_target_shares(mut self, shares: HashMap<String, f64>) -> Self {
        self.target_share = Some(shares);
        self
    }

    // ==================== Policy Construction ====================

    /// Build the configured selection policy.
    pub fn build_selector<P: Participant + Clone + 'static>(
        &self,
        state: Arc<dyn ConversationStatePort>,
        participants: Vec<P>,
    ) -> Result<Box<dyn SpeakerSelector<P>>, SchedulerError> {
        let default_name = match &self.default_participant {
            Some(name) => name.clone(),
            None => participants
                .first()
                .map(|p| p.name().to_string())
                .ok_or(SchedulerError::EmptyRoster)?,
        };

        match self.strategy {
            SelectionStrategy::Delegating => Ok(Box::new(DelegatingSelection::new(
                state,
                participants,
                &default_name,
            )?)),
            SelectionStrategy::Balanced => Ok(Box::new(BalancedSelection::new(
                state,
                participants,
                &default_name,
                self.target_share.as_ref(),
            )?)),
        }
    }

    /// Build the termination policy.
    pub fn build_termination(
        &self,
        state: Arc<dyn ConversationStatePort>,
    ) -> Result<StepBudgetTermination, SchedulerError> {
        StepBudgetTermination::new(state, self.max_steps)
    }
}
