//! Participant actor adapters.
//!
//! Provides [`ScriptedActor`], a deterministic
//! [`ParticipantActor`](floor_application::ParticipantActor) that replays a
//! fixed script of designations and an optional conclusion turn.

mod scripted;

pub use scripted::ScriptedActor;
