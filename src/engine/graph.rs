use crate::domain::GameOutcome;

use super::error::EngineError;
use super::outcome::decide;
use super::types::{AdjacencyMap, VictoryMap};

/// Symmetric per-pair game counts for `games`. Every call starts from an
/// empty map; use [`extend_adjacency`] to grow a running one.
pub fn build_adjacency(games: &[GameOutcome]) -> AdjacencyMap {
    let mut adjacency = AdjacencyMap::new();
    extend_adjacency(&mut adjacency, games);
    adjacency
}

pub fn extend_adjacency(adjacency: &mut AdjacencyMap, games: &[GameOutcome]) {
    for game in games {
        add_pairing(adjacency, &game.home_team, &game.visitor_team);
        add_pairing(adjacency, &game.visitor_team, &game.home_team);
    }
}

/// Directed winner -> loser counts. Teams that never won still get an
/// empty entry so they show up with a zero score downstream.
pub fn build_victories(games: &[GameOutcome]) -> Result<VictoryMap, EngineError> {
    let mut victories = VictoryMap::new();

    for game in games {
        let decision = decide(game)?;
        add_pairing(&mut victories, decision.winner, decision.loser);
        victories.entry(decision.loser.to_string()).or_default();
    }

    Ok(victories)
}

fn add_pairing(map: &mut AdjacencyMap, team: &str, opponent: &str) {
    *map.entry(team.to_string())
        .or_default()
        .entry(opponent.to_string())
        .or_insert(0) += 1;
}

pub fn games_between(adjacency: &AdjacencyMap, team: &str, opponent: &str) -> u32 {
    adjacency
        .get(team)
        .and_then(|opponents| opponents.get(opponent))
        .copied()
        .unwrap_or(0)
}

/// Sum of all pair counts; twice the number of games that built the map
pub fn total_pairings(adjacency: &AdjacencyMap) -> u64 {
    adjacency
        .values()
        .flat_map(|opponents| opponents.values())
        .map(|&count| count as u64)
        .sum()
}

pub fn is_symmetric(adjacency: &AdjacencyMap) -> bool {
    adjacency.iter().all(|(team, opponents)| {
        opponents
            .iter()
            .all(|(opponent, &count)| games_between(adjacency, opponent, team) == count)
    })
}
