use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};

use crate::database::{games, snapshots, DbConn, Snapshot};
use crate::domain::GameOutcome;
use crate::engine::graph::total_pairings;
use crate::engine::{
    build_adjacency, compute_snapshot_with_adjacency, decide, extend_adjacency,
    partition_results, AdjacencyMap, EngineError, MalformedReason, PropagationOptions, Team,
    TeamSnapshot,
};

/// Whether a schedule row can be stored: played games need a winner, and
/// unplayed ones only need two distinct teams.
fn is_storable(game: &GameOutcome) -> Result<(), EngineError> {
    match decide(game) {
        Ok(_) => Ok(()),
        Err(EngineError::MalformedGame {
            reason: MalformedReason::MissingScore,
            ..
        }) if !game.is_completed() => Ok(()),
        Err(e) => Err(e),
    }
}

/// Upsert every storable game, returning the ones that became completed
/// results. Malformed rows are logged and never reach the store.
pub fn store_games(conn: &mut DbConn, schedule: &[GameOutcome]) -> Result<Vec<GameOutcome>> {
    let mut new_results = Vec::new();
    let mut skipped = 0;

    for game in schedule {
        if let Err(e) = is_storable(game) {
            warn!("Skipping {}", e);
            skipped += 1;
            continue;
        }

        let change = games::upsert_game(conn, game)?;
        if change.is_new_result(game.is_completed()) {
            new_results.push(game.clone());
        }
    }

    info!(
        "Stored {} games ({} new results, {} skipped)",
        schedule.len() - skipped,
        new_results.len(),
        skipped
    );
    Ok(new_results)
}

/// Completed games that resolve to a winner; the rest are logged and dropped
pub fn scored_games(games: &[GameOutcome]) -> Vec<GameOutcome> {
    let (scored, rejected) = partition_results(games);
    for e in rejected {
        warn!("Ignoring {}", e);
    }
    scored
}

/// Snapshot with every rostered team at zero and no games counted
pub fn record_zero_snapshot(
    conn: &mut DbConn,
    roster: &[Team],
    as_of: NaiveDate,
    options: &PropagationOptions,
) -> Result<Snapshot> {
    let mut rows: Vec<TeamSnapshot> = roster
        .iter()
        .map(|team| TeamSnapshot {
            team: team.clone(),
            wins: 0,
            losses: 0,
            second_degree: 0,
            third_degree: 0,
        })
        .collect();
    crate::engine::snapshot::sort_rows(&mut rows);

    snapshots::insert_snapshot(
        conn,
        as_of,
        options.second_degree_mode,
        0,
        &rows,
        &AdjacencyMap::new(),
    )
}

/// Recompute from the stored completed games and persist the result.
///
/// The adjacency map of the latest snapshot is carried forward and extended
/// with `new_results`; when it no longer accounts for every completed game
/// it is rebuilt from the full log.
pub fn record_snapshot(
    conn: &mut DbConn,
    roster: &[Team],
    as_of: NaiveDate,
    options: &PropagationOptions,
    new_results: &[GameOutcome],
) -> Result<Snapshot> {
    let completed = scored_games(&games::list_completed(conn)?);

    let adjacency = match snapshots::latest_snapshot(conn)? {
        Some(previous) => {
            let mut adjacency = snapshots::load_adjacency(conn, previous.id)?;
            extend_adjacency(&mut adjacency, new_results);
            adjacency
        }
        None => build_adjacency(&completed),
    };

    let expected = 2 * completed.len() as u64;
    let adjacency = if total_pairings(&adjacency) == expected {
        adjacency
    } else {
        warn!(
            "Carried adjacency counts {} pairings, expected {}; rebuilding from game log",
            total_pairings(&adjacency),
            expected
        );
        build_adjacency(&completed)
    };

    let computed = compute_snapshot_with_adjacency(roster, &completed, adjacency, options)?;

    let snapshot = snapshots::insert_snapshot(
        conn,
        as_of,
        options.second_degree_mode,
        completed.len(),
        &computed.rows,
        &computed.adjacency,
    )?;

    info!(
        "Snapshot {} as of {}: {} games, {} teams",
        snapshot.id,
        as_of,
        completed.len(),
        computed.rows.len()
    );
    Ok(snapshot)
}
