use serde::Serialize;

use super::error::EngineError;
use super::types::{DegreeScores, Score, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Confidence {
    /// Equal scores; neither side is favored
    NoPrediction,
    Favors { side: Side, confidence: f64 },
}

impl Confidence {
    pub fn value(&self) -> Option<f64> {
        match self {
            Confidence::NoPrediction => None,
            Confidence::Favors { confidence, .. } => Some(*confidence),
        }
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Confidence::NoPrediction => None,
            Confidence::Favors { side, .. } => Some(*side),
        }
    }
}

/// Share of the combined score held by the stronger side
pub fn compute_confidence(score_a: Score, score_b: Score) -> Result<Confidence, EngineError> {
    let total = score_a + score_b;
    if total == 0 {
        return Err(EngineError::DivisionUndefined);
    }

    if score_a == score_b {
        return Ok(Confidence::NoPrediction);
    }

    let (side, winning) = if score_a > score_b {
        (Side::First, score_a)
    } else {
        (Side::Second, score_b)
    };

    Ok(Confidence::Favors {
        side,
        confidence: winning as f64 / total as f64,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub team: Team,
    pub confidence: f64,
}

/// Predict a home/visitor matchup from derived scores. Teams missing from
/// `scores` count as 0; a zero total or a tie yields no prediction.
pub fn predict_matchup(scores: &DegreeScores, home: &str, visitor: &str) -> Option<Prediction> {
    let home_score = scores.get(home).copied().unwrap_or(0);
    let visitor_score = scores.get(visitor).copied().unwrap_or(0);

    match compute_confidence(home_score, visitor_score) {
        Ok(Confidence::Favors { side, confidence }) => {
            let team = match side {
                Side::First => home,
                Side::Second => visitor,
            };
            Some(Prediction {
                team: team.to_string(),
                confidence,
            })
        }
        // zero total is the only error compute_confidence returns
        Ok(Confidence::NoPrediction) | Err(_) => None,
    }
}
