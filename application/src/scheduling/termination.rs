//! Step-budget termination policy

use super::state_access::{self, DecisionContext, RequiredCapabilities};
use super::{PolicyId, TerminationPolicy};
use crate::ports::conversation_state::ConversationStatePort;
use async_trait::async_trait;
use floor_domain::{Participant, SchedulerError, StepBudget, TerminationDecision, TurnRecord};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Ends the conversation when a conclusion is set or the step budget runs out.
///
/// Every call to [`decide`](TerminationPolicy::decide) counts one step. The
/// conclusion check comes first, so a conclusion ends the conversation
/// regardless of how many steps remain.
pub struct StepBudgetTermination {
    id: PolicyId,
    state: Arc<dyn ConversationStatePort>,
    budget: StepBudget,
    step_count: u64,
}

impl StepBudgetTermination {
    /// Create the policy. `max_steps` below 1 is coerced up to 1.
    pub fn new(state: Arc<dyn ConversationStatePort>, max_steps: i64) -> Result<Self, SchedulerError> {
        state_access::ensure_capabilities(
            state.as_ref(),
            RequiredCapabilities {
                consume_override: false,
                read_conclusion: true,
            },
        )?;

        let id = PolicyId::next("termination");
        let budget = StepBudget::new(max_steps);
        if budget.was_coerced() {
            warn!(
                "[{}] max_steps {} is below 1, using {}",
                id,
                max_steps,
                budget.max_steps()
            );
        }

        Ok(Self {
            id,
            state,
            budget,
            step_count: 0,
        })
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn max_steps(&self) -> u64 {
        self.budget.max_steps()
    }
}

#[async_trait]
impl TerminationPolicy for StepBudgetTermination {
    fn id(&self) -> PolicyId {
        self.id
    }

    async fn decide(
        &mut self,
        acting: &dyn Participant,
        _history: &[TurnRecord],
    ) -> TerminationDecision {
        self.step_count += 1;
        let ctx = DecisionContext {
            policy: self.id,
            state_id: self.state.id(),
            turn: self.step_count,
        };

        if let Some(conclusion) = state_access::read_conclusion(self.state.as_ref(), &ctx).await {
            info!(
                "[{}] Conclusion reached after {} speaking: {}",
                ctx,
                acting.name(),
                conclusion
            );
            return TerminationDecision::ConclusionReached;
        }

        if self.budget.is_exhausted(self.step_count) {
            info!(
                "[{}] Step budget of {} exhausted",
                ctx,
                self.budget.max_steps()
            );
            return TerminationDecision::StepBudgetExhausted;
        }

        debug!("[{}] Continuing after {}", ctx, acting.name());
        TerminationDecision::Continue
    }

    async fn reset(&mut self) {
        let ctx = DecisionContext {
            policy: self.id,
            state_id: self.state.id(),
            turn: self.step_count,
        };
        if state_access::read_conclusion(self.state.as_ref(), &ctx)
            .await
            .is_some()
        {
            warn!(
                "[{}] Reset while a final conclusion is still set; the state was not cleared between runs",
                ctx
            );
        }
        self.step_count = 0;
    }
}
