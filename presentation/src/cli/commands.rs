//! CLI command definitions

use clap::{Parser, ValueEnum};
use floor_domain::SelectionStrategy;
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for conversation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full transcript with every scheduling decision
    Full,
    /// Participation counts and the final outcome only
    Summary,
    /// JSON output
    Json,
}

/// A scripted override: at the start of `turn`, `name` is designated as the
/// next speaker through the shared conversation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Designation {
    pub turn: usize,
    pub name: String,
}

impl FromStr for Designation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (turn, name) = s
            .split_once(':')
            .ok_or_else(|| format!("expected TURN:NAME, got '{}'", s))?;
        let turn = turn
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid turn number '{}'", turn))?;
        if turn == 0 {
            return Err("turn numbers start at 1".to_string());
        }
        let name = name.trim();
        if name.is_empty() {
            return Err("designated participant name cannot be empty".to_string());
        }
        Ok(Self {
            turn,
            name: name.to_string(),
        })
    }
}

/// CLI arguments for floor-control
#[derive(Parser, Debug)]
#[command(name = "floor-control")]
#[command(author, version, about = "Turn scheduler for multi-participant conversations")]
#[command(long_about = r#"
Floor Control decides who speaks next in a conversation between named
participants, and when the conversation stops.

Two selection strategies are available:
  delegating  Honour explicit designations, otherwise fall back to the default
  balanced    Honour designations, otherwise pick whoever is furthest below
              their target share of turns

The conversation ends when a participant records a final conclusion or the
step budget runs out.

Configuration files are loaded from (in priority order):
1. FLOOR_* environment variables
2. --config <path>     Explicit config file
3. ./floor.toml        Project-level config
4. ~/.config/floor-control/config.toml   Global config

Example:
  floor-control -p PM -p Analyst -p Critic --max-steps 9
  floor-control -p PM -p Analyst --designate 2:PM --designate 3:PM --conclude-at 6
  floor-control -p PM -p Analyst --strategy delegating --output json
"#)]
pub struct Cli {
    /// Participants in roster order (can be specified multiple times)
    #[arg(short, long, value_name = "NAME")]
    pub participant: Vec<String>,

    /// Participant chosen when there is no override and nothing to score
    #[arg(long, value_name = "NAME")]
    pub default: Option<String>,

    /// Speaker selection strategy
    #[arg(short, long, value_name = "STRATEGY", value_parser = parse_strategy)]
    pub strategy: Option<SelectionStrategy>,

    /// Maximum number of turns; values below 1 are raised to 1
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub max_steps: Option<i64>,

    /// Designate the speaker of a turn, as TURN:NAME (can be repeated)
    #[arg(short, long, value_name = "TURN:NAME")]
    pub designate: Vec<Designation>,

    /// Record a final conclusion during this turn
    #[arg(long, value_name = "TURN")]
    pub conclude_at: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append every scheduling decision to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub decision_log: Option<PathBuf>,
}

fn parse_strategy(s: &str) -> Result<SelectionStrategy, String> {
    s.parse::<SelectionStrategy>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_participants_and_designations() {
        let cli = Cli::try_parse_from([
            "floor-control",
            "-p",
            "PM",
            "-p",
            "Analyst",
            "--designate",
            "2:PM",
            "--designate",
            "3: Analyst",
            "--max-steps",
            "-4",
        ])
        .unwrap();

        assert_eq!(cli.participant, vec!["PM", "Analyst"]);
        assert_eq!(
            cli.designate,
            vec![
                Designation {
                    turn: 2,
                    name: "PM".to_string()
                },
                Designation {
                    turn: 3,
                    name: "Analyst".to_string()
                },
            ]
        );
        assert_eq!(cli.max_steps, Some(-4));
        assert_eq!(cli.output, OutputFormat::Full);
        assert!(cli.strategy.is_none());
    }

    #[test]
    fn test_parse_strategy_aliases() {
        let cli = Cli::try_parse_from(["floor-control", "--strategy", "fair"]).unwrap();
        assert_eq!(cli.strategy, Some(SelectionStrategy::Balanced));

        assert!(Cli::try_parse_from(["floor-control", "--strategy", "random"]).is_err());
    }

    #[test]
    fn test_designation_rejects_malformed_values() {
        assert!("PM".parse::<Designation>().is_err());
        assert!("x:PM".parse::<Designation>().is_err());
        assert!("0:PM".parse::<Designation>().is_err());
        assert!("2:  ".parse::<Designation>().is_err());
    }
}
