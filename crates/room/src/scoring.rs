use super::*;
use mole_core::*;
use serde::Serialize;

/// A player's entry in the final ranking.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Standing {
    pub name: String,
    pub score: Amount,
}

/// End-of-game report: descending ranking, winner, and the unmasked
/// impostor.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Results {
    pub winner: Option<Standing>,
    pub impostor_id: Option<String>,
    pub scores: Vec<Standing>,
}

impl Room {
    /// Computes the ranking as a pure function of current investments.
    ///
    /// Each score is the plain sum of the player's allocation, no
    /// multipliers and no impostor penalty. The sort is stable, so equal
    /// scores keep join order. An empty room yields no winner. The
    /// impostor id is echoed as-is even when that connection is long
    /// gone.
    pub fn results(&self) -> Results {
        let mut scores: Vec<Standing> = self
            .players()
            .iter()
            .map(|p| Standing {
                name: p.name().to_string(),
                score: p.total(),
            })
            .collect();
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        Results {
            winner: scores.first().cloned(),
            impostor_id: self.impostor().map(|id| id.to_string()),
            scores,
        }
    }
}
