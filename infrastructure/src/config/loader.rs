//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["floor.toml", ".floor.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `FLOOR_`-prefixed environment variables (`FLOOR_SCHEDULER__MAX_STEPS=20`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./floor.toml` or `./.floor.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/floor-control/config.toml`
    /// 5. Default values
    ///
    /// An explicit path that does not exist is an error rather than a silent
    /// fallback to the remaining sources.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        if let Some(path) = config_path
            && !path.exists()
        {
            return Err(Box::new(figment::Error::from(format!(
                "config file not found: {}",
                path.display()
            ))));
        }

        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("FLOOR_").split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load a single file on top of the defaults, ignoring every other source.
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/floor-control/config.toml if set,
    /// otherwise the platform config directory equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("floor-control").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Environment: FLOOR_* variables");

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./floor.toml or ./.floor.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.conversation.participants.is_empty());
        assert_eq!(config.scheduler.strategy, "balanced");
    }

    #[test]
    fn test_global_config_path_mentions_project() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("floor-control"));
        }
    }

    #[test]
    fn test_load_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floor.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[conversation]
participants = ["PM", "Analyst", "Critic"]

[scheduler]
max_steps = 7
"#
        )
        .unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.conversation.participants.len(), 3);
        assert_eq!(config.scheduler.max_steps, 7);
        // Untouched keys keep their defaults
        assert_eq!(config.scheduler.strategy, "balanced");
    }

    #[test]
    fn test_load_file_reports_type_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("floor.toml");
        std::fs::write(&path, "[scheduler]\nmax_steps = \"many\"\n").unwrap();
        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_load_rejects_missing_explicit_config() {
        figment::Jail::expect_with(|_jail| {
            let missing = PathBuf::from("does-not-exist.toml");
            let err = ConfigLoader::load(Some(&missing)).unwrap_err();
            assert!(err.to_string().contains("does-not-exist.toml"));
            Ok(())
        });
    }

    #[test]
    fn test_load_explicit_config_beats_project_file() {
        figment::Jail::expect_with(|jail| {
            let dir = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", dir);
            jail.create_file(
                "floor.toml",
                r#"
[conversation]
participants = ["PM", "Analyst"]

[scheduler]
max_steps = 3
strategy = "delegating"
"#,
            )?;
            jail.create_file("explicit.toml", "[scheduler]\nmax_steps = 7\n")?;

            let explicit = PathBuf::from("explicit.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;
            assert_eq!(config.scheduler.max_steps, 7);
            // Keys the explicit file leaves out still come from the project file
            assert_eq!(config.scheduler.strategy, "delegating");
            assert_eq!(config.conversation.participants, vec!["PM", "Analyst"]);
            Ok(())
        });
    }

    #[test]
    fn test_load_env_beats_explicit_config() {
        figment::Jail::expect_with(|jail| {
            let dir = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", dir);
            jail.create_file(
                "explicit.toml",
                "[scheduler]\nmax_steps = 7\nstrategy = \"delegating\"\n",
            )?;
            jail.set_env("FLOOR_SCHEDULER__MAX_STEPS", "21");

            let explicit = PathBuf::from("explicit.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;
            assert_eq!(config.scheduler.max_steps, 21);
            assert_eq!(config.scheduler.strategy, "delegating");
            Ok(())
        });
    }

    #[test]
    fn test_load_project_file_without_explicit_config() {
        figment::Jail::expect_with(|jail| {
            let dir = jail.directory().display().to_string();
            jail.set_env("XDG_CONFIG_HOME", dir);
            jail.create_file(".floor.toml", "[scheduler]\nmax_steps = 9\n")?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.scheduler.max_steps, 9);
            Ok(())
        });
    }
}
