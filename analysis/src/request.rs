//! Request and result of one analysis.

use serde::{Deserialize, Serialize};

pub const DEFAULT_AUDIENCE: &str = "beginner";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Position in FEN.
    pub position: String,
    /// Candidate moves as supplied; may contain junk or duplicates.
    pub candidate_moves: Vec<String>,
    #[serde(default = "default_audience")]
    pub audience_level: String,
}

fn default_audience() -> String {
    DEFAULT_AUDIENCE.to_string()
}

impl AnalysisRequest {
    pub fn new(position: impl Into<String>, candidate_moves: Vec<String>) -> Self {
        Self {
            position: position.into(),
            candidate_moves,
            audience_level: default_audience(),
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience_level = audience.into();
        self
    }
}

/// Outcome of [`crate::PositionAnalyzer::analyze_position`].
///
/// On failure only `error_message` is set; on success the explanation is
/// present and the recommendation is present whenever any candidate was
/// evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub succeeded: bool,
    pub explanation: Option<String>,
    pub error_message: Option<String>,
    pub recommended_move: Option<String>,
    /// Comparable (mate-normalized) score of the recommended move.
    pub recommended_score: Option<i32>,
    /// Input moves dropped by validation or left without an evaluation.
    #[serde(default)]
    pub skipped_moves: Vec<String>,
}

impl AnalysisResult {
    pub fn success(
        explanation: String,
        recommendation: Option<(String, i32)>,
        skipped_moves: Vec<String>,
    ) -> Self {
        let (recommended_move, recommended_score) = match recommendation {
            Some((mv, score)) => (Some(mv), Some(score)),
            None => (None, None),
        };
        Self {
            succeeded: true,
            explanation: Some(explanation),
            error_message: None,
            recommended_move,
            recommended_score,
            skipped_moves,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            explanation: None,
            error_message: Some(message.into()),
            recommended_move: None,
            recommended_score: None,
            skipped_moves: Vec::new(),
        }
    }
}
