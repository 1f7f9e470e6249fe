//! Scripted participant actor.
//!
//! Each turn produces a short fixed message. When the script holds a
//! designation for the following turn, the actor writes it to the shared
//! state before returning, exactly as a live participant delegating the
//! floor would. On the conclusion turn it records a final conclusion.

use async_trait::async_trait;
use floor_application::{ActorError, ConversationStatePort, ParticipantActor};
use floor_domain::{Conclusion, Participant, ParticipantName, TurnRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// Deterministic actor driven by a turn script
#[derive(Debug, Clone, Default)]
pub struct ScriptedActor {
    /// turn → participant to designate for that turn
    designations: BTreeMap<usize, ParticipantName>,
    conclude_at: Option<usize>,
}

impl ScriptedActor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Designate `name` as the speaker of `turn`.
    ///
    /// Designations for turn 1 have no preceding turn to write them; use
    /// [`ScriptedActor::opening_designation`] and apply it to the state
    /// before the conversation starts.
    pub fn with_designation(mut self, turn: usize, name: impl Into<ParticipantName>) -> Self {
        self.designations.insert(turn, name.into());
        self
    }

    /// Record a final conclusion while acting on `turn`.
    pub fn with_conclusion_at(mut self, turn: usize) -> Self {
        self.conclude_at = Some(turn);
        self
    }

    /// The designation for the first turn, if scripted.
    pub fn opening_designation(&self) -> Option<&ParticipantName> {
        self.designations.get(&1)
    }
}

#[async_trait]
impl<P: Participant> ParticipantActor<P> for ScriptedActor {
    async fn act(
        &self,
        participant: &P,
        history: &[TurnRecord],
        state: &dyn ConversationStatePort,
    ) -> Result<String, ActorError> {
        let turn = history.len() + 1;
        let mut content = format!("{} takes turn {}.", participant.name(), turn);

        if let Some(next) = self.designations.get(&(turn + 1)) {
            debug!("{} designates {} for turn {}", participant.name(), next, turn + 1);
            state.designate_next_speaker(next.clone()).await?;
            content.push_str(&format!(" Handing over to {}.", next));
        }

        if self.conclude_at == Some(turn) {
            let conclusion = Conclusion::new(format!(
                "Concluded by {} at turn {}",
                participant.name(),
                turn
            ));
            debug!("{} records a final conclusion", participant.name());
            state.set_final_conclusion(conclusion).await?;
            content.push_str(" Wrapping up.");
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InMemoryConversationState;
    use floor_domain::NamedParticipant;

    #[tokio::test]
    async fn test_designates_following_turn() {
        let state = InMemoryConversationState::new();
        let actor = ScriptedActor::new().with_designation(2, "Critic");
        let pm = NamedParticipant::new("PM");

        let content = actor.act(&pm, &[], &state).await.unwrap();
        assert!(content.contains("Handing over to Critic"));
        assert_eq!(
            state.consume_next_speaker_override().await.unwrap(),
            Some(ParticipantName::new("Critic"))
        );
    }

    #[tokio::test]
    async fn test_no_designation_leaves_state_untouched() {
        let state = InMemoryConversationState::new();
        let actor = ScriptedActor::new().with_designation(5, "Critic");
        let pm = NamedParticipant::new("PM");

        actor.act(&pm, &[], &state).await.unwrap();
        assert_eq!(state.consume_next_speaker_override().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concludes_on_scripted_turn() {
        let state = InMemoryConversationState::new();
        let actor = ScriptedActor::new().with_conclusion_at(2);
        let analyst = NamedParticipant::new("Analyst");
        let history = vec![TurnRecord::new(1, ParticipantName::new("PM"), "hi")];

        actor.act(&analyst, &history, &state).await.unwrap();
        let conclusion = state.final_conclusion().await.unwrap().unwrap();
        assert_eq!(conclusion.summary(), "Concluded by Analyst at turn 2");
    }

    #[test]
    fn test_opening_designation() {
        let actor = ScriptedActor::new().with_designation(1, "PM");
        assert_eq!(actor.opening_designation(), Some(&ParticipantName::new("PM")));
    }
}
