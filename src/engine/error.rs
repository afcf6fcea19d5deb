use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    MissingScore,
    TiedScore,
    MissingTeam,
    SameTeam,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MalformedReason::MissingScore => "score is missing",
            MalformedReason::TiedScore => "scores are tied",
            MalformedReason::MissingTeam => "team name is empty",
            MalformedReason::SameTeam => "team listed on both sides",
        };
        f.write_str(text)
    }
}

/// Errors raised by the win-propagation engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A game whose winner cannot be determined
    #[error("malformed game on {date} ({visitor} at {home}): {reason}")]
    MalformedGame {
        date: NaiveDate,
        home: String,
        visitor: String,
        reason: MalformedReason,
    },

    /// Confidence asked for two zero scores
    #[error("confidence is undefined when both scores are zero")]
    DivisionUndefined,

    #[error("unknown second-degree mode: {0} (expected all-games or wins-only)")]
    UnknownMode(String),
}
