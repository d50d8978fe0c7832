//! mealwarden library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use core::clock::{Clock, FixedClock, SystemClock};
use errors::{AppError, AppResult};

/// Build the clock for this invocation: the real wall clock, or a pinned
/// instant when the hidden `--now` override is present.
fn resolve_clock(cli: &Cli) -> AppResult<Box<dyn Clock>> {
    match &cli.now {
        Some(s) => {
            let fixed =
                FixedClock::parse(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
            Ok(Box::new(fixed))
        }
        None => Ok(Box::new(SystemClock)),
    }
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let clock = resolve_clock(cli)?;

    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Resident { .. } => {
            cli::commands::resident::handle(&cli.command, cfg, clock.as_ref())
        }
        Commands::Confirm { .. } => {
            cli::commands::confirm::handle(&cli.command, cfg, clock.as_ref())
        }
        Commands::Away { .. } => cli::commands::away::handle(&cli.command, cfg, clock.as_ref()),
        Commands::Day { .. } => cli::commands::day::handle(&cli.command, cfg, clock.as_ref()),
        Commands::History { .. } => {
            cli::commands::history::handle(&cli.command, cfg, clock.as_ref())
        }
        Commands::Report { .. } => {
            cli::commands::report::handle(&cli.command, cfg, clock.as_ref())
        }
        Commands::Trend { .. } => cli::commands::trend::handle(&cli.command, cfg, clock.as_ref()),
        Commands::Export { .. } => {
            cli::commands::export::handle(&cli.command, cfg, clock.as_ref())
        }
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    // Command-line DB override wins over the config file.
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
