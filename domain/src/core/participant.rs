//! Participants and rosters
//!
//! The scheduler treats participants as opaque values that expose a unique
//! name. Their lifecycle belongs to the surrounding system.

use super::error::SchedulerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A validated participant name (Value Object)
///
/// Names are compared exactly; surrounding whitespace is rejected as empty
/// but otherwise preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Create a new participant name
    ///
    /// # Panics
    /// Panics if the name is empty or only whitespace
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.trim().is_empty(), "Participant name cannot be empty");
        Self(name)
    }

    /// Try to create a new name, returning None if invalid
    pub fn try_new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ParticipantName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or_else(|| "participant name cannot be empty".to_string())
    }
}

impl From<ParticipantName> for String {
    fn from(name: ParticipantName) -> Self {
        name.0
    }
}

impl From<&str> for ParticipantName {
    fn from(s: &str) -> Self {
        ParticipantName::new(s)
    }
}

impl AsRef<str> for ParticipantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Capability set the scheduler requires from a participant.
///
/// Nothing beyond a readable, unique name is needed.
pub trait Participant: Send + Sync {
    fn name(&self) -> &str;
}

impl<P: Participant + ?Sized> Participant for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Minimal immutable participant: just a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedParticipant {
    name: ParticipantName,
}

impl NamedParticipant {
    pub fn new(name: impl Into<ParticipantName>) -> Self {
        Self { name: name.into() }
    }
}

impl Participant for NamedParticipant {
    fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Result of resolving the configured default participant against a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultResolution {
    /// The participant that will act as default
    pub name: ParticipantName,
    /// `true` when the requested name was not in the roster and the first
    /// roster member was substituted
    pub substituted: bool,
}

/// A validated, ordered roster of participants.
///
/// Guarantees: non-empty, every name non-empty, every name unique.
/// Roster order is preserved and is the final tie-break order for selection.
#[derive(Debug, Clone)]
pub struct Roster<P> {
    members: Vec<P>,
    index: HashMap<String, usize>,
}

impl<P: Participant> Roster<P> {
    /// Validate and build a roster.
    pub fn new(members: Vec<P>) -> Result<Self, SchedulerError> {
        if members.is_empty() {
            return Err(SchedulerError::EmptyRoster);
        }

        let mut index = HashMap::with_capacity(members.len());
        for (position, member) in members.iter().enumerate() {
            let name = member.name();
            if name.trim().is_empty() {
                return Err(SchedulerError::InvalidParticipantName(position));
            }
            if index.insert(name.to_string(), position).is_some() {
                return Err(SchedulerError::DuplicateParticipant(name.to_string()));
            }
        }

        Ok(Self { members, index })
    }

    pub fn get(&self, name: &str) -> Option<&P> {
        self.index.get(name).map(|&i| &self.members[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.members.iter()
    }

    /// Names in roster order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name())
    }

    /// Resolve the default participant, substituting the first roster member
    /// when `requested` is unknown.
    pub fn resolve_default(&self, requested: &str) -> DefaultResolution {
        if self.contains(requested) {
            return DefaultResolution {
                name: ParticipantName::new(requested),
                substituted: false,
            };
        }
        DefaultResolution {
            name: ParticipantName::new(self.members[0].name()),
            substituted: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Result<Roster<NamedParticipant>, SchedulerError> {
        Roster::new(names.iter().map(|n| NamedParticipant::new(*n)).collect())
    }

    /// Participant whose name is not validated on construction
    #[derive(Debug)]
    struct RawParticipant(String);

    impl Participant for RawParticipant {
        fn name(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn test_participant_name_try_new() {
        assert!(ParticipantName::try_new("").is_none());
        assert!(ParticipantName::try_new("   ").is_none());
        assert_eq!(ParticipantName::try_new("PM").unwrap().as_str(), "PM");
    }

    #[test]
    #[should_panic]
    fn test_empty_participant_name_panics() {
        ParticipantName::new("");
    }

    #[test]
    fn test_participant_name_deserialize_rejects_empty() {
        let ok: Result<ParticipantName, _> = serde_json::from_str("\"Critic\"");
        assert_eq!(ok.unwrap().as_str(), "Critic");

        let err: Result<ParticipantName, _> = serde_json::from_str("\"  \"");
        assert!(err.is_err());
    }

    #[test]
    fn test_roster_rejects_empty() {
        assert_eq!(roster(&[]).unwrap_err(), SchedulerError::EmptyRoster);
    }

    #[test]
    fn test_roster_rejects_duplicates() {
        assert_eq!(
            roster(&["PM", "Analyst", "PM"]).unwrap_err(),
            SchedulerError::DuplicateParticipant("PM".to_string())
        );
    }

    #[test]
    fn test_roster_rejects_blank_names() {
        let members = vec![RawParticipant("PM".into()), RawParticipant(" ".into())];
        assert_eq!(
            Roster::new(members).unwrap_err(),
            SchedulerError::InvalidParticipantName(1)
        );
    }

    #[test]
    fn test_roster_preserves_order() {
        let roster = roster(&["PM", "Analyst", "Critic"]).unwrap();
        assert_eq!(
            roster.names().collect::<Vec<_>>(),
            vec!["PM", "Analyst", "Critic"]
        );
        assert_eq!(roster.get("Analyst").unwrap().name(), "Analyst");
        assert!(roster.get("Oracle").is_none());
    }

    #[test]
    fn test_resolve_default_known() {
        let roster = roster(&["PM", "Analyst"]).unwrap();
        let resolved = roster.resolve_default("Analyst");
        assert_eq!(resolved.name.as_str(), "Analyst");
        assert!(!resolved.substituted);
    }

    #[test]
    fn test_resolve_default_substitutes_first_member() {
        let roster = roster(&["PM", "Analyst"]).unwrap();
        let resolved = roster.resolve_default("Oracle");
        assert_eq!(resolved.name.as_str(), "PM");
        assert!(resolved.substituted);
    }
}
