//! Engine evaluation of one position.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Move, Score};

/// Maximum number of principal-variation moves kept per evaluation.
pub const MAX_PV_LEN: usize = 5;

pub type PrincipalVariation = SmallVec<[Move; MAX_PV_LEN]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: Score,
    pub depth: u32,
    pub pv: PrincipalVariation,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Search depth must be positive")]
pub struct InvalidEvaluationError;

impl Evaluation {
    /// Build an evaluation; the principal variation is cut to [`MAX_PV_LEN`] moves.
    pub fn new(
        score: Score,
        depth: u32,
        pv: impl IntoIterator<Item = Move>,
    ) -> Result<Self, InvalidEvaluationError> {
        if depth == 0 {
            return Err(InvalidEvaluationError);
        }
        Ok(Self {
            score,
            depth,
            pv: pv.into_iter().take(MAX_PV_LEN).collect(),
        })
    }

    /// Principal variation joined by spaces, SAN where available.
    pub fn pv_line(&self) -> String {
        self.pv
            .iter()
            .map(Move::notation)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Eval: {} (depth {})", self.score.describe(), self.depth)
    }
}
