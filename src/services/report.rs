use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::config::AppConfig;
use crate::database::{self, games, setup, snapshots, SnapshotWithRows};
use crate::files::write_schedule;

use super::prediction::MatchupPrediction;

/// Latest stored snapshot, or `None` before the first setup
pub fn latest_standings(config: &AppConfig) -> Result<Option<SnapshotWithRows>> {
    if !Path::new(&config.storage.database_path).exists() {
        return Ok(None);
    }

    let pool = database::create_pool(&config.storage.database_path)?;
    let mut conn = database::get_connection(&pool)?;
    setup::initialize_database(&mut conn)?;
    snapshots::load_latest(&mut conn)
}

/// Write every stored game to a schedule CSV, returning the game count
pub fn export_schedule(config: &AppConfig, output: &Path) -> Result<usize> {
    let pool = database::create_pool(&config.storage.database_path)?;
    let mut conn = database::get_connection(&pool)?;
    setup::initialize_database(&mut conn)?;

    let all = games::list_all(&mut conn)?;
    write_schedule(output, &all)?;

    Ok(all.len())
}

pub fn format_standings(standings: &SnapshotWithRows) -> String {
    let snapshot = &standings.snapshot;
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n",
        format!(
            "Standings as of {} ({}, {} games)",
            snapshot.as_of_date, snapshot.second_degree_mode, snapshot.games_counted
        )
        .bold()
    ));
    out.push_str(&format!(
        "{}\n",
        format!(
            "{:>4}  {:<26} {:>4} {:>4} {:>8} {:>8}",
            "#", "Team", "W", "L", "2nd", "3rd"
        )
        .underline()
    ));

    for (idx, row) in standings.rows.iter().enumerate() {
        let line = format!(
            "{:>4}  {:<26} {:>4} {:>4} {:>8} {:>8}",
            idx + 1,
            row.team,
            row.wins,
            row.losses,
            row.second_degree,
            row.third_degree
        );
        if row.wins > row.losses {
            out.push_str(&format!("{}\n", line.green()));
        } else if row.wins < row.losses {
            out.push_str(&format!("{}\n", line.red()));
        } else {
            out.push_str(&format!("{}\n", line));
        }
    }

    out
}

pub fn format_prediction(result: &MatchupPrediction) -> String {
    let header = format!(
        "{} ({}) vs {} ({}) as of {}",
        result.home,
        result.home_second_degree,
        result.visitor,
        result.visitor_second_degree,
        result.as_of_date
    );

    match &result.prediction {
        Some(prediction) => format!(
            "{}\nPick: {} with {:.1}% confidence",
            header,
            prediction.team.bold(),
            prediction.confidence * 100.0
        ),
        None => format!("{}\n{}", header, "No prediction (scores are level)".yellow()),
    }
}
