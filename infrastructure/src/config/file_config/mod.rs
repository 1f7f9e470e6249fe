//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application-layer
//! [`SchedulerParams`] after validation.

mod conversation;
mod logging;
mod scheduler;

pub use conversation::FileConversationConfig;
pub use logging::FileLoggingConfig;
pub use scheduler::FileSchedulerConfig;

use floor_application::SchedulerParams;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("participant name cannot be empty")]
    EmptyParticipantName,

    #[error("participant listed twice: {0}")]
    DuplicateParticipant(String),

    #[error("{0}")]
    UnknownStrategy(String),

    #[error("target_share references a participant not in [conversation]: {0}")]
    UnknownTargetShareParticipant(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Roster settings
    pub conversation: FileConversationConfig,
    /// Policy settings
    pub scheduler: FileSchedulerConfig,
    /// Decision log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    ///
    /// Share totals are not checked here; the balanced policy rejects them
    /// at construction with the exact sum.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let mut seen = HashSet::new();
        for name in &self.conversation.participants {
            if name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyParticipantName);
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigValidationError::DuplicateParticipant(name.clone()));
            }
        }

        self.scheduler
            .parse_strategy()
            .map_err(ConfigValidationError::UnknownStrategy)?;

        // Only checkable once a roster is configured; CLI rosters are checked by the policy
        if let Some(shares) = &self.scheduler.target_share
            && !self.conversation.participants.is_empty()
        {
            let mut names: Vec<&String> = shares.keys().collect();
            names.sort();
            if let Some(unknown) = names.into_iter().find(|name| !seen.contains(name.as_str())) {
                return Err(ConfigValidationError::UnknownTargetShareParticipant(
                    unknown.clone(),
                ));
            }
        }

        Ok(())
    }

    /// Convert into application-layer scheduler parameters.
    pub fn to_scheduler_params(&self) -> Result<SchedulerParams, ConfigValidationError> {
        let strategy = self
            .scheduler
            .parse_strategy()
            .map_err(ConfigValidationError::UnknownStrategy)?;

        let mut params = SchedulerParams::default()
            .with_strategy(strategy)
            .with_max_steps(self.scheduler.max_steps);
        if let Some(name) = &self.conversation.default_participant {
            params = params.with_default_participant(name.clone());
        }
        if let Some(shares) = &self.scheduler.target_share {
            params = params.with_target_shares(shares.clone());
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floor_domain::SelectionStrategy;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[conversation]
participants = ["PM", "Analyst", "Critic"]
default_participant = "PM"

[scheduler]
strategy = "balanced"
max_steps = 40

[scheduler.target_share]
PM = 0.5
Analyst = 0.3
Critic = 0.2

[logging]
decision_log = "logs/decisions.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.logging.decision_log,
            Some("logs/decisions.jsonl".to_string())
        );

        let params = config.to_scheduler_params().unwrap();
        assert_eq!(params.strategy, SelectionStrategy::Balanced);
        assert_eq!(params.max_steps, 40);
        assert_eq!(params.default_participant, Some("PM".to_string()));
        assert_eq!(params.target_share.unwrap().len(), 3);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[conversation]
participants = ["PM"]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.conversation.participants.len(), 1);
        // Defaults should apply
        assert_eq!(config.scheduler, FileSchedulerConfig::default());
        assert!(config.logging.decision_log.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_participant_name() {
        let toml_str = r#"
[conversation]
participants = ["PM", " "]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyParticipantName)
        );
    }

    #[test]
    fn test_validate_duplicate_participant() {
        let toml_str = r#"
[conversation]
participants = ["PM", "Critic", "PM"]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DuplicateParticipant("PM".to_string()))
        );
    }

    #[test]
    fn test_validate_unknown_strategy() {
        let toml_str = r#"
[scheduler]
strategy = "round-robin"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnknownStrategy(_))
        ));
        assert!(config.to_scheduler_params().is_err());
    }

    #[test]
    fn test_validate_unknown_share_participant() {
        let toml_str = r#"
[conversation]
participants = ["PM", "Critic"]

[scheduler.target_share]
PM = 0.5
Oracle = 0.5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UnknownTargetShareParticipant(
                "Oracle".to_string()
            ))
        );
    }
}
