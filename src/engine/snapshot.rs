use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::GameOutcome;

use super::degrees::{compute_third_degree, second_degree_for_mode};
use super::error::EngineError;
use super::graph::{build_adjacency, build_victories};
use super::outcome::decide;
use super::standings::build_standings;
use super::types::{
    AdjacencyMap, DegreeScores, PropagationOptions, Score, StandingsMap, Team,
};

/// One team's line in a standings snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub team: Team,
    pub wins: u32,
    pub losses: u32,
    pub second_degree: Score,
    pub third_degree: Score,
}

#[derive(Debug, Clone)]
pub struct SnapshotComputation {
    pub rows: Vec<TeamSnapshot>,
    pub standings: StandingsMap,
    pub adjacency: AdjacencyMap,
    pub second_degree: DegreeScores,
    pub third_degree: DegreeScores,
}

pub fn completed_games(games: &[GameOutcome]) -> Vec<GameOutcome> {
    games.iter().filter(|g| g.is_completed()).cloned().collect()
}

/// Split completed games into those that resolve to a winner and the errors
/// for those that do not (tied scores, same team on both sides). Unplayed
/// games are left out of both.
pub fn partition_results(games: &[GameOutcome]) -> (Vec<GameOutcome>, Vec<EngineError>) {
    let mut scored = Vec::new();
    let mut rejected = Vec::new();

    for game in games.iter().filter(|g| g.is_completed()) {
        match decide(game) {
            Ok(_) => scored.push(game.clone()),
            Err(e) => rejected.push(e),
        }
    }

    (scored, rejected)
}

/// Full recomputation from the game log. Unplayed games are skipped.
pub fn compute_snapshot(
    roster: &[Team],
    games: &[GameOutcome],
    options: &PropagationOptions,
) -> Result<SnapshotComputation, EngineError> {
    let completed = completed_games(games);
    let adjacency = build_adjacency(&completed);
    compute_snapshot_with_adjacency(roster, &completed, adjacency, options)
}

/// Recompute standings and degrees from `completed`, reusing an adjacency
/// map that was carried forward and extended with new games.
pub fn compute_snapshot_with_adjacency(
    roster: &[Team],
    completed: &[GameOutcome],
    adjacency: AdjacencyMap,
    options: &PropagationOptions,
) -> Result<SnapshotComputation, EngineError> {
    let standings = build_standings(completed)?;
    let victories = build_victories(completed)?;

    let second_degree = second_degree_for_mode(
        options.second_degree_mode,
        &standings,
        &adjacency,
        &victories,
    );
    let third_degree = compute_third_degree(&standings, &adjacency, options.third_degree);

    let rows = assemble_rows(roster, &standings, &adjacency, &second_degree, &third_degree);

    Ok(SnapshotComputation {
        rows,
        standings,
        adjacency,
        second_degree,
        third_degree,
    })
}

/// Rows for every rostered team plus any team seen in the log, sorted by
/// wins (descending) then name. Missing values default to zero.
pub fn assemble_rows(
    roster: &[Team],
    standings: &StandingsMap,
    adjacency: &AdjacencyMap,
    second_degree: &DegreeScores,
    third_degree: &DegreeScores,
) -> Vec<TeamSnapshot> {
    let teams = collect_teams(roster, standings, adjacency);

    let mut rows: Vec<TeamSnapshot> = teams
        .into_iter()
        .map(|team| {
            let record = standings.get(&team).copied().unwrap_or_default();
            TeamSnapshot {
                wins: record.wins,
                losses: record.losses,
                second_degree: second_degree.get(&team).copied().unwrap_or(0),
                third_degree: third_degree.get(&team).copied().unwrap_or(0),
                team,
            }
        })
        .collect();

    sort_rows(&mut rows);
    rows
}

fn collect_teams(
    roster: &[Team],
    standings: &StandingsMap,
    adjacency: &AdjacencyMap,
) -> BTreeSet<Team> {
    roster
        .iter()
        .chain(standings.keys())
        .chain(adjacency.keys())
        .cloned()
        .collect()
}

pub fn sort_rows(rows: &mut [TeamSnapshot]) {
    rows.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.team.cmp(&b.team)));
}

/// Second-degree scores keyed by team, as stored in a snapshot
pub fn second_degree_scores(rows: &[TeamSnapshot]) -> DegreeScores {
    rows.iter().map(|r| (r.team.clone(), r.second_degree)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::graph::extend_adjacency;
    use crate::engine::types::SecondDegreeMode;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    fn roster() -> Vec<Team> {
        ["A", "B", "C", "D"].iter().map(|t| t.to_string()).collect()
    }

    fn log() -> Vec<GameOutcome> {
        vec![
            GameOutcome::played(day(1), "A", 100, "B", 90),
            GameOutcome::played(day(2), "B", 100, "C", 90),
            GameOutcome::scheduled(day(20), "C", "A"),
        ]
    }

    #[test]
    fn test_snapshot_covers_roster_with_zero_defaults() {
        let snapshot = compute_snapshot(&roster(), &log(), &PropagationOptions::default()).unwrap();

        assert_eq!(snapshot.rows.len(), 4);
        let d = snapshot.rows.iter().find(|r| r.team == "D").unwrap();
        assert_eq!(
            d,
            &TeamSnapshot {
                team: "D".to_string(),
                wins: 0,
                losses: 0,
                second_degree: 0,
                third_degree: 0,
            }
        );
    }

    #[test]
    fn test_snapshot_skips_unplayed_games() {
        let snapshot = compute_snapshot(&roster(), &log(), &PropagationOptions::default()).unwrap();

        assert_eq!(snapshot.adjacency.get("C").map(|o| o.len()), Some(1));
        assert_eq!(snapshot.standings["C"].games_played(), 1);
    }

    #[test]
    fn test_rows_sorted_by_wins_then_name() {
        let snapshot = compute_snapshot(&roster(), &log(), &PropagationOptions::default()).unwrap();
        let order: Vec<&str> = snapshot.rows.iter().map(|r| r.team.as_str()).collect();

        assert_eq!(order, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_mode_changes_second_degree_only() {
        let all_games =
            compute_snapshot(&roster(), &log(), &PropagationOptions::default()).unwrap();
        let wins_only = compute_snapshot(
            &roster(),
            &log(),
            &PropagationOptions::default().with_mode(SecondDegreeMode::WinsOnly),
        )
        .unwrap();

        assert_eq!(all_games.second_degree["B"], 1);
        assert_eq!(wins_only.second_degree["B"], 0);
        assert_eq!(all_games.third_degree, wins_only.third_degree);
    }

    #[test]
    fn test_carried_adjacency_matches_full_rebuild() {
        let games = completed_games(&log());
        let (earlier, later) = games.split_at(1);

        let mut carried = build_adjacency(earlier);
        extend_adjacency(&mut carried, later);

        let options = PropagationOptions::default();
        let incremental =
            compute_snapshot_with_adjacency(&roster(), &games, carried, &options).unwrap();
        let full = compute_snapshot(&roster(), &games, &options).unwrap();

        assert_eq!(incremental.rows, full.rows);
    }

    #[test]
    fn test_partition_drops_ties_and_unplayed() {
        let mut games = log();
        games.push(GameOutcome::played(day(9), "A", 0, "D", 0));

        let (scored, rejected) = partition_results(&games);

        assert_eq!(scored, completed_games(&log()));
        assert_eq!(rejected.len(), 1);
        assert!(matches!(rejected[0], EngineError::MalformedGame { .. }));
        assert!(compute_snapshot(&roster(), &scored, &PropagationOptions::default()).is_ok());
    }

    #[test]
    fn test_empty_log_gives_zero_rows() {
        let snapshot = compute_snapshot(&roster(), &[], &PropagationOptions::default()).unwrap();

        assert_eq!(snapshot.rows.len(), 4);
        assert!(snapshot.rows.iter().all(|r| r.wins == 0 && r.second_degree == 0));
    }

    #[test]
    fn test_second_degree_scores_from_rows() {
        let snapshot = compute_snapshot(&roster(), &log(), &PropagationOptions::default()).unwrap();
        let scores = second_degree_scores(&snapshot.rows);

        assert_eq!(scores.len(), snapshot.rows.len());
        assert_eq!(scores["C"], 1);
    }
}
