//! Configuration file loading for floor-control
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `FLOOR_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./floor.toml` or `./.floor.toml`
//! 4. Global: `$XDG_CONFIG_HOME/floor-control/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileConversationConfig, FileLoggingConfig,
    FileSchedulerConfig,
};
pub use loader::ConfigLoader;
