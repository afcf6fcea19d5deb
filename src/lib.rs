pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod engine;
pub mod files;
pub mod http;
pub mod rate_limiter;
pub mod services;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use log::info;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::engine::SecondDegreeMode;
use crate::services::backtest::BacktestService;
use crate::services::prediction::PredictionService;
use crate::services::report::{
    export_schedule, format_prediction, format_standings, latest_standings,
};
use crate::services::server::ServerService;
use crate::services::setup::{teardown, SetupService};
use crate::services::update::{UpdateOutcome, UpdateService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn handle_setup(schedule: Option<PathBuf>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env()?;
        let service = SetupService::new(config, schedule);
        let summary = service.run(today()).await?;
        info!(
            "Setup stored {} games; snapshot {} as of {}",
            summary.games, summary.snapshot.id, summary.snapshot.as_of_date
        );
        Ok(())
    })
}

pub fn handle_update(force: bool, mode: Option<SecondDegreeMode>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut config = AppConfig::from_env()?;
        if let Some(mode) = mode {
            config.propagation.snapshot_mode = mode;
        }

        let service = UpdateService::new(config, force);
        match service.run(today()).await? {
            UpdateOutcome::AlreadyCurrent(snapshot) => {
                println!(
                    "Already up to date (snapshot {} as of {})",
                    snapshot.id, snapshot.as_of_date
                )
            }
            UpdateOutcome::SetUp(snapshot) => {
                println!("Setup complete (snapshot {} as of {})", snapshot.id, snapshot.as_of_date)
            }
            UpdateOutcome::Updated { snapshot, new_results } => println!(
                "Updated with {} new results (snapshot {} as of {})",
                new_results, snapshot.id, snapshot.as_of_date
            ),
        }
        Ok(())
    })
}

pub fn handle_standings() -> Result<()> {
    let config = AppConfig::from_env()?;
    match latest_standings(&config)? {
        Some(standings) => print!("{}", format_standings(&standings)),
        None => println!("No standings yet. Run `setup` first."),
    }
    Ok(())
}

pub fn handle_predict(home: &str, visitor: &str) -> Result<()> {
    let config = AppConfig::from_env()?;
    let result = PredictionService::new(config).run(home, visitor)?;
    println!("{}", format_prediction(&result));
    Ok(())
}

pub fn handle_backtest(
    from: NaiveDate,
    to: Option<NaiveDate>,
    mode: Option<SecondDegreeMode>,
    schedule: Option<PathBuf>,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env()?;
        let mode = mode.unwrap_or(config.propagation.backtest_mode);
        let service = BacktestService::new(config, mode, schedule);
        let summary = service.run(from, to.unwrap_or(from)).await?;

        match summary.accuracy() {
            Some(accuracy) => println!(
                "{} of {} picks correct ({:.1}%) across {} games",
                summary.correct,
                summary.predicted,
                accuracy * 100.0,
                summary.games
            ),
            None => println!("No picks made across {} games", summary.games),
        }
        Ok(())
    })
}

pub fn handle_export(output: &Path) -> Result<()> {
    let config = AppConfig::from_env()?;
    let count = export_schedule(&config, output)?;
    println!("Wrote {} games to {}", count, output.display());
    Ok(())
}

pub fn handle_teardown() -> Result<()> {
    let config = AppConfig::from_env()?;
    teardown(&config)
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env()?;
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
