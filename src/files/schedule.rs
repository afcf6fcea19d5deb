use anyhow::{Context, Result};
use log::{info, warn};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::domain::{GameOutcome, ScheduleEntry};

/// Read a schedule CSV (`date,visitor_team,visitor_pts,home_team,home_pts`).
/// Empty points mean the game has not been played.
pub fn read_schedule(path: &Path) -> Result<Vec<GameOutcome>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open schedule file {}", path.display()))?;
    let games = read_schedule_from(file)?;
    info!("Read {} games from {}", games.len(), path.display());
    Ok(games)
}

pub fn write_schedule(path: &Path, games: &[GameOutcome]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create schedule file {}", path.display()))?;
    write_schedule_to(file, games)?;
    info!("Wrote {} games to {}", games.len(), path.display());
    Ok(())
}

fn read_schedule_from<R: Read>(reader: R) -> Result<Vec<GameOutcome>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut games = Vec::new();

    for (idx, result) in reader.deserialize::<ScheduleEntry>().enumerate() {
        match result {
            Ok(entry) => match entry.to_outcome() {
                Some(game) => games.push(game),
                None => warn!(
                    "Skipping schedule row {}: unreadable date {:?}",
                    idx + 1,
                    entry.date
                ),
            },
            Err(e) => warn!("Skipping malformed schedule row {}: {}", idx + 1, e),
        }
    }

    Ok(games)
}

fn write_schedule_to<W: Write>(writer: W, games: &[GameOutcome]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    for game in games {
        writer
            .serialize(ScheduleEntry::from(game))
            .context("Failed to write schedule row")?;
    }

    writer.flush().context("Failed to flush schedule file")?;
    Ok(())
}
