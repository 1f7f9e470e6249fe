//! Balanced participation selection policy
//!
//! Honors a pending override; otherwise picks the participant furthest below
//! their target share, using recency and banked imbalance budget as
//! refinements. See [`ParticipationLedger`] for the scoring formula and the
//! tie-break rule.
//!
//! # Flow
//!
//! ```text
//! total_turns += 1
//!        ↓
//! override pending and known? ──yes──► bookkeeping + budget adjustment ──► Override
//!        │ no / unknown / read fault (logged)
//!        ↓
//! score every known roster member ──► best? ──yes──► bookkeeping ──► Scored
//!                                        │ no (empty roster)
//!                                        ↓
//!                                 default participant ──► bookkeeping ──► Fallback
//! ```

use super::state_access::{self, DecisionContext, RequiredCapabilities};
use super::{PolicyId, Selection, SelectionReason, SpeakerSelector};
use crate::ports::conversation_state::ConversationStatePort;
use async_trait::async_trait;
use floor_domain::{
    Participant, ParticipantName, ParticipationLedger, Roster, SchedulerError, TargetShares,
    TurnRecord,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fairness-balancing speaker selection.
pub struct BalancedSelection<P> {
    id: PolicyId,
    state: Arc<dyn ConversationStatePort>,
    roster: Roster<P>,
    default_name: ParticipantName,
    shares: TargetShares,
    ledger: ParticipationLedger,
}

impl<P: Participant + Clone + 'static> BalancedSelection<P> {
    /// Create the policy.
    ///
    /// Without `target_share`, shares are derived from the roster: the default
    /// participant gets `min(0.4, 2/N)` and the others split the rest evenly.
    pub fn new(
        state: Arc<dyn ConversationStatePort>,
        participants: Vec<P>,
        default_participant_name: &str,
        target_share: Option<&HashMap<String, f64>>,
    ) -> Result<Self, SchedulerError> {
        state_access::ensure_capabilities(
            state.as_ref(),
            RequiredCapabilities {
                consume_override: true,
                read_conclusion: true,
            },
        )?;
        let roster = Roster::new(participants)?;
        let id = PolicyId::next("balanced");

        let resolved = roster.resolve_default(default_participant_name);
        if resolved.substituted {
            warn!(
                "[{}] Default participant '{}' is not in the roster, using '{}'",
                id, default_participant_name, resolved.name
            );
        }

        let shares = match target_share {
            Some(explicit) => TargetShares::validated(&roster, explicit)?,
            None => TargetShares::derive(&roster, resolved.name.as_str()),
        };
        debug!(
            "[{}] Target shares: {}",
            id,
            shares
                .iter()
                .map(|(name, share)| format!("{}={:.3}", name, share))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            id,
            state,
            ledger: ParticipationLedger::new(&shares),
            roster,
            default_name: resolved.name,
            shares,
        })
    }

    pub fn default_participant_name(&self) -> &ParticipantName {
        &self.default_name
    }

    pub fn target_shares(&self) -> &TargetShares {
        &self.shares
    }

    /// Read-only view of the fairness bookkeeping
    pub fn ledger(&self) -> &ParticipationLedger {
        &self.ledger
    }

    fn participant(&self, name: &str) -> Result<P, SchedulerError> {
        self.roster
            .get(name)
            .cloned()
            .ok_or(SchedulerError::NoParticipantAvailable)
    }
}

#[async_trait]
impl<P: Participant + Clone + 'static> SpeakerSelector<P> for BalancedSelection<P> {
    fn id(&self) -> PolicyId {
        self.id
    }

    async fn select(
        &mut self,
        roster: &[P],
        _history: &[TurnRecord],
    ) -> Result<Selection<P>, SchedulerError> {
        let turn = self.ledger.begin_turn();
        let state = Arc::clone(&self.state);
        let ctx = DecisionContext {
            policy: self.id,
            state_id: state.id(),
            turn,
        };

        if let Some(name) = state_access::consume_override(state.as_ref(), &ctx).await {
            if self.roster.contains(name.as_str()) {
                let participant = self.participant(name.as_str())?;
                self.ledger.record_selection(name.as_str());
                self.ledger.apply_override_adjustment(name.as_str());
                debug!(
                    "[{}] Override selects {} (rate {:.3}, target {:.3})",
                    ctx,
                    name,
                    self.ledger.current_rate(name.as_str()),
                    self.shares.get(name.as_str())
                );
                return Ok(Selection::new(participant, SelectionReason::Override));
            }
            warn!(
                "[{}] Override names unknown participant '{}', ignoring",
                ctx, name
            );
        }

        for candidate in roster {
            if !self.roster.contains(candidate.name()) {
                warn!(
                    "[{}] Roster entry '{}' is unknown to this policy, skipping",
                    ctx,
                    candidate.name()
                );
            }
        }

        match self
            .ledger
            .best_candidate(roster.iter().map(|p| p.name()))
        {
            Some(winner) => {
                let participant = self.participant(&winner.name)?;
                self.ledger.record_selection(&winner.name);
                debug!(
                    "[{}] Scored selection: {} ({:.3})",
                    ctx, winner.name, winner.score
                );
                Ok(Selection::new(
                    participant,
                    SelectionReason::Scored {
                        score: winner.score,
                    },
                ))
            }
            None => {
                let participant = self.participant(self.default_name.as_str())?;
                self.ledger.record_selection(self.default_name.as_str());
                debug!(
                    "[{}] Nothing to score, falling back to {}",
                    ctx, self.default_name
                );
                Ok(Selection::new(participant, SelectionReason::Fallback))
            }
        }
    }

    async fn reset(&mut self) {
        let ctx = DecisionContext {
            policy: self.id,
            state_id: self.state.id(),
            turn: self.ledger.total_turns(),
        };
        if let Some(stale) = state_access::consume_override(self.state.as_ref(), &ctx).await {
            debug!("[{}] Drained stale override for {}", ctx, stale);
        }
        self.ledger.reset();
    }
}
