use crate::domain::GameOutcome;

use super::error::EngineError;
use super::outcome::decide;
use super::types::StandingsMap;

/// Tally wins and losses from completed games.
///
/// Only teams that appear in `games` get a record. Unplayed games must be
/// filtered out first; a missing or tied score fails the whole tally.
pub fn build_standings(games: &[GameOutcome]) -> Result<StandingsMap, EngineError> {
    let mut standings = StandingsMap::new();

    for game in games {
        let decision = decide(game)?;
        record_win(&mut standings, decision.winner);
        record_loss(&mut standings, decision.loser);
    }

    Ok(standings)
}

fn record_win(standings: &mut StandingsMap, team: &str) {
    standings.entry(team.to_string()).or_default().wins += 1;
}

fn record_loss(standings: &mut StandingsMap, team: &str) {
    standings.entry(team.to_string()).or_default().losses += 1;
}

/// Wins for `team`, zero when the team has no record
pub fn wins_of(standings: &StandingsMap, team: &str) -> u32 {
    standings.get(team).map(|r| r.wins).unwrap_or(0)
}
