//! Structured input handed to the language model.

use chess::{Evaluation, Score};
use serde::{Deserialize, Serialize};

use crate::error::{ExplainError, ExplainResult};

/// One candidate move with its evaluation, scored for the side that plays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSummary {
    /// Coordinate notation as validated, e.g. "g1f3".
    pub coordinate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algebraic: Option<String>,
    pub evaluation: Evaluation,
}

impl CandidateSummary {
    pub fn new(coordinate: impl Into<String>, algebraic: Option<String>, evaluation: Evaluation) -> Self {
        Self {
            coordinate: coordinate.into(),
            algebraic,
            evaluation,
        }
    }

    pub fn score(&self) -> Score {
        self.evaluation.score
    }

    /// "Nf3 (g1f3)" when SAN is known, otherwise the coordinate.
    pub fn label(&self) -> String {
        match &self.algebraic {
            Some(san) if san != &self.coordinate => format!("{} ({})", san, self.coordinate),
            _ => self.coordinate.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationContext {
    pub fen: String,
    /// "White" or "Black".
    pub side_to_move: String,
    /// Evaluation of the position before any candidate is played.
    pub baseline: Evaluation,
    /// Candidates in the order they were requested.
    pub candidates: Vec<CandidateSummary>,
    pub audience: String,
}

impl ExplanationContext {
    /// Reject contexts that cannot produce a meaningful prompt.
    pub fn validate(&self) -> ExplainResult<()> {
        if self.fen.trim().is_empty() {
            return Err(ExplainError::InvalidContext("position is missing".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(cp: i32) -> Evaluation {
        Evaluation::new(Score::centipawns(cp), 10, Vec::new()).unwrap()
    }

    #[test]
    fn test_label() {
        let with_san = CandidateSummary::new("g1f3", Some("Nf3".to_string()), eval(10));
        assert_eq!(with_san.label(), "Nf3 (g1f3)");
        let bare = CandidateSummary::new("g1f3", None, eval(10));
        assert_eq!(bare.label(), "g1f3");
    }

    #[test]
    fn test_validate() {
        let mut ctx = ExplanationContext {
            fen: chess::START_FEN.to_string(),
            side_to_move: "White".to_string(),
            baseline: eval(20),
            candidates: vec![CandidateSummary::new("e2e4", None, eval(30))],
            audience: "beginner".to_string(),
        };
        assert!(ctx.validate().is_ok());

        // No evaluated candidates still yields a prompt from the baseline.
        ctx.candidates.clear();
        assert!(ctx.validate().is_ok());

        ctx.fen = "  ".to_string();
        assert!(matches!(ctx.validate(), Err(ExplainError::InvalidContext(_))));
    }
}
