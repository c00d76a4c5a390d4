//! CLI entrypoint for Werewolf Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{
    AnnouncementSink, CollectionMode, CompositeAnnouncementSink, DecisionOracle,
    GameProgressNotifier, NoProgress, RunGameUseCase,
};
use council_domain::{OutputFormat, Role};
use council_infrastructure::{
    ChatCompletionsOracle, ChatOracleSettings, ConfigLoader, FileConfig, JsonlAnnouncementLogger,
    OracleKind, RandomOracle,
};
use council_presentation::{
    Cli, ConsoleAnnouncer, ConsoleFormatter, OracleChoice, ProgressReporter, ReportFormatter,
    SimpleProgress,
};
use std::io::IsTerminal;
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
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting Werewolf Council");

    // === Configuration ===
    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&cli, &mut file_config);

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let game_config = file_config
        .to_game_config()
        .context("Invalid configuration")?;

    // === Dependency Injection ===
    let oracle: Arc<dyn DecisionOracle> = match file_config.oracle.kind {
        OracleKind::Random => Arc::new(RandomOracle::new(game_config.seed)),
        OracleKind::Chat => {
            if file_config.oracle.models.is_empty() {
                bail!("The chat oracle needs at least one model. Use -m <MODEL> or [oracle] models.");
            }
            let settings = ChatOracleSettings {
                base_url: file_config.oracle.base_url.clone(),
                temperature: file_config.oracle.temperature,
                max_tokens: file_config.oracle.max_tokens,
                ..ChatOracleSettings::default()
            }
            .with_api_key_env(&file_config.oracle.api_key_env);
            if settings.api_key.is_none() {
                warn!(
                    "{} is not set; sending requests without an API key",
                    file_config.oracle.api_key_env
                );
            }
            Arc::new(ChatCompletionsOracle::new(settings)?)
        }
    };

    let use_case = RunGameUseCase::new(oracle, game_config)?;

    // === Sinks ===
    let format = file_config.output.format.unwrap_or_default();
    let announcer = ConsoleAnnouncer::new();
    let logger = match &file_config.output.log_file {
        Some(path) => match JsonlAnnouncementLogger::new(path) {
            Some(logger) => Some(logger),
            None => bail!("Could not create game log file {}", path.display()),
        },
        None => None,
    };

    let mut sinks: Vec<&dyn AnnouncementSink> = Vec::new();
    if format == OutputFormat::Full {
        sinks.push(&announcer);
    }
    if let Some(logger) = &logger {
        sinks.push(logger);
    }
    let sink = CompositeAnnouncementSink::new(sinks);

    // Progress bars only make sense on a terminal; plain lines otherwise
    let reporter = ProgressReporter::new();
    let progress: &dyn GameProgressNotifier = if cli.quiet {
        &NoProgress
    } else if std::io::stderr().is_terminal() {
        &reporter
    } else {
        &SimpleProgress
    };

    // Ctrl-C ends the game after the step in progress
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, ending the game");
                cancel.cancel();
            }
        });
    }

    if format == OutputFormat::Full {
        let distribution = use_case.distribution();
        println!();
        println!("+============================================================+");
        println!("|           Werewolf Council                                 |");
        println!("+============================================================+");
        println!();
        println!(
            "Players: {}  Werewolves: {}  Max rounds: {}",
            use_case.config().player_count,
            distribution.count(Role::Werewolf),
            use_case.config().max_rounds
        );
    }

    let report = use_case.execute_with(&sink, progress, cancel).await?;

    if let Some(logger) = &logger {
        logger.write_report(&report);
        info!("Game log written to {}", logger.path().display());
    }

    // Output results
    let formatter: &dyn ReportFormatter = &ConsoleFormatter;
    let output = match format {
        OutputFormat::Full => formatter.format(&report),
        OutputFormat::Summary => formatter.format_summary(&report),
        OutputFormat::Json => formatter.format_json(&report),
    };

    println!("{}", output);

    Ok(())
}

/// Command-line flags win over every configuration file
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(players) = cli.players {
        config.game.players = players;
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.game.max_rounds = max_rounds;
    }
    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
    }
    if cli.serial_votes {
        config.game.vote_mode = CollectionMode::Serial;
    }
    if let Some(oracle) = cli.oracle {
        config.oracle.kind = match oracle {
            OracleChoice::Random => OracleKind::Random,
            OracleChoice::Chat => OracleKind::Chat,
        };
    }
    if !cli.model.is_empty() {
        config.oracle.models = cli.model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.oracle.base_url = base_url.clone();
    }
    if let Some(path) = &cli.log_file {
        config.output.log_file = Some(path.clone());
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format);
    }
    if cli.no_color {
        config.output.color = false;
    }
}
