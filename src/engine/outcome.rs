use crate::domain::GameOutcome;

use super::error::{EngineError, MalformedReason};

/// Winner and loser of a completed game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision<'a> {
    pub winner: &'a str,
    pub loser: &'a str,
}

/// Resolve a game to its winner. The strictly higher score wins; there is
/// no fallback side when scores are equal or missing.
pub fn decide(game: &GameOutcome) -> Result<Decision<'_>, EngineError> {
    validate_teams(game)?;

    let (home_score, visitor_score) = match (game.home_score, game.visitor_score) {
        (Some(home), Some(visitor)) => (home, visitor),
        _ => return Err(malformed(game, MalformedReason::MissingScore)),
    };

    if home_score > visitor_score {
        Ok(Decision {
            winner: &game.home_team,
            loser: &game.visitor_team,
        })
    } else if visitor_score > home_score {
        Ok(Decision {
            winner: &game.visitor_team,
            loser: &game.home_team,
        })
    } else {
        Err(malformed(game, MalformedReason::TiedScore))
    }
}

fn validate_teams(game: &GameOutcome) -> Result<(), EngineError> {
    if game.home_team.trim().is_empty() || game.visitor_team.trim().is_empty() {
        return Err(malformed(game, MalformedReason::MissingTeam));
    }
    if game.home_team == game.visitor_team {
        return Err(malformed(game, MalformedReason::SameTeam));
    }
    Ok(())
}

fn malformed(game: &GameOutcome, reason: MalformedReason) -> EngineError {
    EngineError::MalformedGame {
        date: game.date,
        home: game.home_team.clone(),
        visitor: game.visitor_team.clone(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
    }

    #[test]
    fn test_higher_score_wins_either_side() {
        let home_win = GameOutcome::played(day(), "Heat", 101, "Magic", 99);
        let away_win = GameOutcome::played(day(), "Heat", 88, "Magic", 120);

        assert_eq!(decide(&home_win).unwrap(), Decision { winner: "Heat", loser: "Magic" });
        assert_eq!(decide(&away_win).unwrap(), Decision { winner: "Magic", loser: "Heat" });
    }

    #[test]
    fn test_tie_is_rejected_not_given_to_home() {
        let tie = GameOutcome::played(day(), "Heat", 100, "Magic", 100);

        match decide(&tie) {
            Err(EngineError::MalformedGame { reason, .. }) => {
                assert_eq!(reason, MalformedReason::TiedScore)
            }
            other => panic!("expected tie rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_score_is_rejected() {
        let game = GameOutcome::new(day(), "Heat", "Magic", Some(100), None);

        match decide(&game) {
            Err(EngineError::MalformedGame { reason, .. }) => {
                assert_eq!(reason, MalformedReason::MissingScore)
            }
            other => panic!("expected missing score rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_team_names_are_rejected() {
        let blank = GameOutcome::played(day(), " ", 100, "Magic", 90);
        let same = GameOutcome::played(day(), "Heat", 100, "Heat", 90);

        assert!(matches!(
            decide(&blank),
            Err(EngineError::MalformedGame { reason: MalformedReason::MissingTeam, .. })
        ));
        assert!(matches!(
            decide(&same),
            Err(EngineError::MalformedGame { reason: MalformedReason::SameTeam, .. })
        ));
    }
}
