//! Infrastructure layer for floor-control
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod actor;
pub mod config;
pub mod logging;
pub mod state;

// Re-export commonly used types
pub use actor::ScriptedActor;
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileConversationConfig, FileLoggingConfig,
    FileSchedulerConfig,
};
pub use logging::JsonlDecisionLogger;
pub use state::InMemoryConversationState;
