//! movie-sound-prepare
//!
//! Batch tool: for every input file, select audio tracks by language,
//! correct their loudness, encode them to AAC and remux them into
//! `<name>_aac.mkv` (or write `<name>_aac.m4a` in podcast mode).
//!
//! Usage:
//!   movie-sound-prepare -i "/movies/*.mkv" -l eng
//!   movie-sound-prepare -i "[2019] Film.mp4" --podcast --mono

mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use msp_core::config::{ConfigManager, Settings};
use msp_core::logging::{init_tracing, LogConfig, LogLevel, RunLogger};
use msp_core::orchestrator::run_batch;
use msp_core::tools::SystemRunner;

use crate::cli::Cli;

fn load_settings(cli: &Cli) -> Result<Settings> {
    match &cli.config {
        Some(path) => {
            let mut manager = ConfigManager::new(path);
            manager
                .load_or_create()
                .with_context(|| format!("loading settings from {}", path.display()))?;
            Ok(manager.into_settings())
        }
        None => Ok(Settings::default()),
    }
}

fn run(cli: Cli) -> Result<bool> {
    let settings = load_settings(&cli)?;
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        settings.logging.level
    };
    init_tracing(level);
    tracing::debug!("movie-sound-prepare {}", msp_core::version());

    let logger = RunLogger::stdout(LogConfig {
        level,
        error_tail: settings.logging.error_tail,
    });
    let run = cli.run_context(&settings);
    let report = run_batch(&run, &settings, &SystemRunner::new(), &logger);

    for failure in &report.failed {
        tracing::debug!("failed: {} ({})", failure.input.display(), failure.error);
    }
    Ok(report.is_success())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
