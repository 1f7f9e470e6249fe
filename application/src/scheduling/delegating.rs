//! Delegating selection policy (baseline)

use super::state_access::{self, DecisionContext, RequiredCapabilities};
use super::{PolicyId, Selection, SelectionReason, SpeakerSelector};
use crate::ports::conversation_state::ConversationStatePort;
use async_trait::async_trait;
use floor_domain::{Participant, ParticipantName, Roster, SchedulerError, TurnRecord};
use std::sync::Arc;
use tracing::{debug, warn};

/// Honors a pending override, otherwise hands the turn to the default
/// participant.
///
/// Keeps no fairness state: any bookkeeping is the caller's concern.
pub struct DelegatingSelection<P> {
    id: PolicyId,
    state: Arc<dyn ConversationStatePort>,
    roster: Roster<P>,
    default_name: ParticipantName,
    decisions: u64,
}

impl<P: Participant + Clone + 'static> DelegatingSelection<P> {
    /// Create the policy.
    ///
    /// An unknown `default_participant_name` is replaced by the first roster
    /// member (logged).
    pub fn new(
        state: Arc<dyn ConversationStatePort>,
        participants: Vec<P>,
        default_participant_name: &str,
    ) -> Result<Self, SchedulerError> {
        state_access::ensure_capabilities(
            state.as_ref(),
            RequiredCapabilities {
                consume_override: true,
                read_conclusion: true,
            },
        )?;
        let roster = Roster::new(participants)?;
        let id = PolicyId::next("delegating");

        let resolved = roster.resolve_default(default_participant_name);
        if resolved.substituted {
            warn!(
                "[{}] Default participant '{}' is not in the roster, using '{}'",
                id, default_participant_name, resolved.name
            );
        }

        Ok(Self {
            id,
            state,
            roster,
            default_name: resolved.name,
            decisions: 0,
        })
    }

    pub fn default_participant_name(&self) -> &ParticipantName {
        &self.default_name
    }

    fn default_participant(&self) -> Result<P, SchedulerError> {
        self.roster
            .get(self.default_name.as_str())
            .cloned()
            .ok_or(SchedulerError::NoParticipantAvailable)
    }
}

#[async_trait]
impl<P: Participant + Clone + 'static> SpeakerSelector<P> for DelegatingSelection<P> {
    fn id(&self) -> PolicyId {
        self.id
    }

    async fn select(
        &mut self,
        _roster: &[P],
        history: &[TurnRecord],
    ) -> Result<Selection<P>, SchedulerError> {
        self.decisions += 1;
        let ctx = DecisionContext {
            policy: self.id,
            state_id: self.state.id(),
            turn: self.decisions,
        };

        if let Some(name) = state_access::consume_override(self.state.as_ref(), &ctx).await {
            match self.roster.get(name.as_str()) {
                Some(participant) => {
                    debug!("[{}] Override selects {}", ctx, name);
                    return Ok(Selection::new(participant.clone(), SelectionReason::Override));
                }
                None => {
                    warn!(
                        "[{}] Override names unknown participant '{}', ignoring",
                        ctx, name
                    );
                }
            }
        }

        if history.is_empty() {
            debug!("[{}] Empty history, opening with {}", ctx, self.default_name);
        } else {
            debug!("[{}] Delegating to {}", ctx, self.default_name);
        }
        let participant = self.default_participant()?;
        Ok(Selection::new(participant, SelectionReason::Fallback))
    }

    async fn reset(&mut self) {
        let ctx = DecisionContext {
            policy: self.id,
            state_id: self.state.id(),
            turn: self.decisions,
        };
        if let Some(stale) = state_access::consume_override(self.state.as_ref(), &ctx).await {
            debug!("[{}] Drained stale override for {}", ctx, stale);
        }
        self.decisions = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::conversation_state::StateCapabilities;
    use crate::scheduling::test_support::{StubState, participants};
    use floor_domain::NamedParticipant;

    fn policy(state: Arc<StubState>) -> DelegatingSelection<NamedParticipant> {
        DelegatingSelection::new(state, participants(&["PM", "Analyst", "Critic"]), "PM").unwrap()
    }

    fn history() -> Vec<TurnRecord> {
        vec![TurnRecord::new(1, "PM".into(), "Kickoff")]
    }

    #[tokio::test]
    async fn test_empty_history_returns_default() {
        let state = Arc::new(StubState::new());
        let mut policy = policy(state);
        let roster = participants(&["PM", "Analyst", "Critic"]);
        let selection = policy.select(&roster, &[]).await.unwrap();
        assert_eq!(selection.participant.name(), "PM");
        assert_eq!(selection.reason, SelectionReason::Fallback);
    }

    #[tokio::test]
    async fn test_non_empty_history_still_returns_default() {
        let state = Arc::new(StubState::new());
        let mut policy = policy(state);
        let roster = participants(&["PM", "Analyst", "Critic"]);
        for _ in 0..3 {
            assert_eq!(policy.next(&roster, &history()).await.unwrap().name(), "PM");
        }
    }

    #[tokio::test]
    async fn test_override_precedence_and_consumption() {
        let state = Arc::new(StubState::new());
        let mut policy = policy(state.clone());
        let roster = participants(&["PM", "Analyst", "Critic"]);

        state.designate_next_speaker("Critic".into()).await.unwrap();
        let selection = policy.select(&roster, &history()).await.unwrap();
        assert_eq!(selection.participant.name(), "Critic");
        assert_eq!(selection.reason, SelectionReason::Override);

        // Consumed: the slot is empty and the next turn falls back
        assert!(
            state
                .consume_next_speaker_override()
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(policy.next(&roster, &history()).await.unwrap().name(), "PM");
    }

    #[tokio::test]
    async fn test_unknown_override_falls_back() {
        let state = Arc::new(StubState::new());
        let mut policy = policy(state.clone());
        let roster = participants(&["PM", "Analyst", "Critic"]);

        state.designate_next_speaker("Oracle".into()).await.unwrap();
        let selection = policy.select(&roster, &history()).await.unwrap();
        assert_eq!(selection.participant.name(), "PM");
        assert_eq!(selection.reason, SelectionReason::Fallback);
        assert!(state.pending_override().is_none());
    }

    #[tokio::test]
    async fn test_read_fault_falls_back() {
        let state = Arc::new(StubState::new());
        let mut policy = policy(state.clone());
        let roster = participants(&["PM", "Analyst", "Critic"]);

        state.designate_next_speaker("Analyst".into()).await.unwrap();
        state.set_failing(true);
        assert_eq!(policy.next(&roster, &history()).await.unwrap().name(), "PM");
    }

    #[tokio::test]
    async fn test_unknown_default_substitutes_first_member() {
        let state = Arc::new(StubState::new());
        let mut policy =
            DelegatingSelection::new(state, participants(&["Analyst", "Critic"]), "PM").unwrap();
        assert_eq!(policy.default_participant_name().as_str(), "Analyst");
        assert_eq!(policy.next(&[], &[]).await.unwrap().name(), "Analyst");
    }

    #[tokio::test]
    async fn test_construction_errors() {
        let state = Arc::new(StubState::new());
        assert_eq!(
            DelegatingSelection::<NamedParticipant>::new(state.clone(), vec![], "PM")
                .err()
                .unwrap(),
            SchedulerError::EmptyRoster
        );
        assert_eq!(
            DelegatingSelection::new(state, participants(&["PM", "PM"]), "PM")
                .err()
                .unwrap(),
            SchedulerError::DuplicateParticipant("PM".to_string())
        );

        let no_override = Arc::new(StubState::with_capabilities(StateCapabilities {
            consume_override: false,
            read_conclusion: true,
        }));
        assert!(matches!(
            DelegatingSelection::new(no_override, participants(&["PM"]), "PM"),
            Err(SchedulerError::MissingStateCapability(_))
        ));
    }

    #[tokio::test]
    async fn test_reset_drains_pending_override() {
        let state = Arc::new(StubState::new());
        let mut policy = policy(state.clone());

        state.designate_next_speaker("Critic".into()).await.unwrap();
        policy.reset().await;
        assert!(state.pending_override().is_none());
        policy.reset().await;
        assert!(state.pending_override().is_none());

        let roster = participants(&["PM", "Analyst", "Critic"]);
        assert_eq!(policy.next(&roster, &[]).await.unwrap().name(), "PM");
    }
}
