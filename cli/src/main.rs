//! CLI entrypoint for Floor Control
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use floor_application::{ConversationStatePort, RunConversationInput, RunConversationUseCase};
use floor_domain::{NamedParticipant, ParticipantName};
use floor_infrastructure::{
    ConfigLoader, FileConfig, InMemoryConversationState, JsonlDecisionLogger, ScriptedActor,
};
use floor_presentation::{Cli, ConsoleFormatter};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);
    config.validate()?;

    if config.conversation.participants.is_empty() {
        bail!("No participants. Use -p NAME or list them under [conversation] in floor.toml.");
    }

    let params = config.to_scheduler_params()?;
    let roster: Vec<NamedParticipant> = config
        .conversation
        .participants
        .iter()
        .map(|name| NamedParticipant::new(name.as_str()))
        .collect();

    info!(
        "Starting Floor Control: {} participants, {} strategy",
        roster.len(),
        params.strategy
    );

    // === Dependency Injection ===
    let state: Arc<dyn ConversationStatePort> = Arc::new(InMemoryConversationState::new());

    let mut actor = ScriptedActor::new();
    for designation in &cli.designate {
        let Some(name) = ParticipantName::try_new(designation.name.as_str()) else {
            bail!("Invalid designation for turn {}", designation.turn);
        };
        actor = actor.with_designation(designation.turn, name);
    }
    if let Some(turn) = cli.conclude_at {
        actor = actor.with_conclusion_at(turn);
    }
    if let Some(name) = actor.opening_designation() {
        state.designate_next_speaker(name.clone()).await?;
    }

    let selector = params.build_selector(state.clone(), roster.clone())?;
    let termination = params.build_termination(state.clone())?;
    let mut use_case =
        RunConversationUseCase::new(selector, Box::new(termination), Arc::new(actor), state);

    if let Some(path) = config.logging.decision_log.as_deref().map(PathBuf::from) {
        match JsonlDecisionLogger::new(&path) {
            Some(logger) => use_case = use_case.with_logger(Arc::new(logger)),
            None => warn!("Decision logging disabled"),
        }
    }

    // Stop between turns on Ctrl-C
    let cancellation = CancellationToken::new();
    let signal_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let input = RunConversationInput::new(roster).with_cancellation(cancellation);
    let outcome = use_case.execute(input).await?;

    println!("{}", ConsoleFormatter::render(&outcome, cli.output));

    Ok(())
}

/// Command-line flags win over every configuration source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if !cli.participant.is_empty() {
        config.conversation.participants = cli.participant.clone();
    }
    if let Some(name) = &cli.default {
        config.conversation.default_participant = Some(name.clone());
    }
    if let Some(strategy) = cli.strategy {
        config.scheduler.strategy = strategy.as_str().to_string();
    }
    if let Some(max_steps) = cli.max_steps {
        config.scheduler.max_steps = max_steps;
    }
    if let Some(path) = &cli.decision_log {
        config.logging.decision_log = Some(path.display().to_string());
    }
}
