use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Transaction};

use super::connection::DbConn;
use super::models::{Snapshot, SnapshotWithRows};
use crate::engine::snapshot::sort_rows;
use crate::engine::{AdjacencyMap, SecondDegreeMode, TeamSnapshot};

const SNAPSHOT_COLUMNS: &str = "id, as_of_date, second_degree_mode, games_counted, created_at";

/// Persist a snapshot header together with its rows and adjacency map.
/// Either everything is written or nothing is.
pub fn insert_snapshot(
    conn: &mut DbConn,
    as_of_date: NaiveDate,
    mode: SecondDegreeMode,
    games_counted: usize,
    rows: &[TeamSnapshot],
    adjacency: &AdjacencyMap,
) -> Result<Snapshot> {
    let tx = conn.transaction().context("Failed to begin snapshot transaction")?;

    let sql = format!(
        "INSERT INTO snapshots (as_of_date, second_degree_mode, games_counted)
         VALUES (?1, ?2, ?3)
         RETURNING {}",
        SNAPSHOT_COLUMNS
    );
    let snapshot = tx
        .query_row(
            &sql,
            params![as_of_date, mode.as_str(), games_counted as i64],
            parse_snapshot_row,
        )
        .context("Failed to insert snapshot")?;

    insert_rows(&tx, snapshot.id, rows)?;
    insert_adjacency(&tx, snapshot.id, adjacency)?;

    tx.commit().context("Failed to commit snapshot")?;

    log::debug!(
        "Stored snapshot {} for {} ({} teams, {} games)",
        snapshot.id,
        as_of_date,
        rows.len(),
        games_counted
    );

    Ok(snapshot)
}

fn insert_rows(tx: &Transaction, snapshot_id: i64, rows: &[TeamSnapshot]) -> Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO snapshot_rows (snapshot_id, team, wins, losses, second_degree, third_degree)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;

    for row in rows {
        stmt.execute(params![
            snapshot_id,
            row.team,
            row.wins,
            row.losses,
            row.second_degree,
            row.third_degree
        ])
        .with_context(|| format!("Failed to insert snapshot row for {}", row.team))?;
    }

    Ok(())
}

fn insert_adjacency(tx: &Transaction, snapshot_id: i64, adjacency: &AdjacencyMap) -> Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO snapshot_adjacency (snapshot_id, team, opponent, games)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    for (team, opponents) in adjacency {
        for (opponent, games) in opponents {
            stmt.execute(params![snapshot_id, team, opponent, games])
                .context("Failed to insert adjacency entry")?;
        }
    }

    Ok(())
}

fn parse_snapshot_row(row: &rusqlite::Row) -> rusqlite::Result<Snapshot> {
    let mode: String = row.get(2)?;
    let second_degree_mode = SecondDegreeMode::from_str(&mode)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    Ok(Snapshot {
        id: row.get(0)?,
        as_of_date: row.get(1)?,
        second_degree_mode,
        games_counted: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Most recent snapshot by as-of date; ties go to the later insert
pub fn latest_snapshot(conn: &mut DbConn) -> Result<Option<Snapshot>> {
    let sql = format!(
        "SELECT {} FROM snapshots ORDER BY as_of_date DESC, id DESC LIMIT 1",
        SNAPSHOT_COLUMNS
    );

    conn.query_row(&sql, [], parse_snapshot_row)
        .optional()
        .context("Failed to query latest snapshot")
}

/// Latest snapshot taken on exactly `date`
pub fn find_by_date(conn: &mut DbConn, date: NaiveDate) -> Result<Option<Snapshot>> {
    let sql = format!(
        "SELECT {} FROM snapshots WHERE as_of_date = ?1 ORDER BY id DESC LIMIT 1",
        SNAPSHOT_COLUMNS
    );

    conn.query_row(&sql, params![date], parse_snapshot_row)
        .optional()
        .context("Failed to query snapshot by date")
}

/// Every stored snapshot, oldest first
pub fn list_snapshots(conn: &mut DbConn) -> Result<Vec<Snapshot>> {
    let sql = format!("SELECT {} FROM snapshots ORDER BY as_of_date, id", SNAPSHOT_COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let snapshots = stmt
        .query_map([], parse_snapshot_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list snapshots")?;

    Ok(snapshots)
}

pub fn load_rows(conn: &mut DbConn, snapshot_id: i64) -> Result<Vec<TeamSnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT team, wins, losses, second_degree, third_degree
         FROM snapshot_rows WHERE snapshot_id = ?1",
    )?;

    let mut rows = stmt
        .query_map(params![snapshot_id], |row| {
            Ok(TeamSnapshot {
                team: row.get(0)?,
                wins: row.get(1)?,
                losses: row.get(2)?,
                second_degree: row.get(3)?,
                third_degree: row.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load snapshot rows")?;

    sort_rows(&mut rows);
    Ok(rows)
}

pub fn load_adjacency(conn: &mut DbConn, snapshot_id: i64) -> Result<AdjacencyMap> {
    let mut stmt = conn.prepare(
        "SELECT team, opponent, games FROM snapshot_adjacency WHERE snapshot_id = ?1",
    )?;

    let entries = stmt
        .query_map(params![snapshot_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, u32>(2)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to load snapshot adjacency")?;

    let mut adjacency = AdjacencyMap::new();
    for (team, opponent, games) in entries {
        adjacency.entry(team).or_default().insert(opponent, games);
    }

    Ok(adjacency)
}

pub fn load_latest(conn: &mut DbConn) -> Result<Option<SnapshotWithRows>> {
    let Some(snapshot) = latest_snapshot(conn)? else {
        return Ok(None);
    };

    let rows = load_rows(conn, snapshot.id)?;
    Ok(Some(SnapshotWithRows { snapshot, rows }))
}
