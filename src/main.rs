use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use grid_snake::app::{self, App};
use grid_snake::config::EngineConfig;
use grid_snake::error::AppError;
use grid_snake::game::GameEngine;
use grid_snake::logging::{self, LogLevel};
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file with engine tuning values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid side length; overrides the config file.
    #[arg(long = "grid-size")]
    grid_size: Option<u16>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Log destination (defaults to grid-snake.log in the temp directory).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(cli: Cli) -> Result<(), AppError> {
    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(&log_path, cli.log_level)?;

    let config = resolve_config(&cli)?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(
        "starting on a {0}x{0} grid, seed {1:?}, config {config:?}",
        config.grid_size, cli.seed
    );

    install_panic_hook();

    let mut session = TerminalSession::enter()?;
    app::run(session.terminal_mut(), App::new(GameEngine::new(config, rng)))?;
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }

    config.validate()?;
    Ok(config)
}
