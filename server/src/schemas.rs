//! JSON bodies of the HTTP API.

use analysis::{AnalysisRequest, AnalysisResult, DEFAULT_AUDIENCE};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Shortest accepted FEN; anything shorter cannot describe a position.
pub const MIN_FEN_LEN: usize = 10;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExplainRequest {
    pub fen: String,
    pub moves: Vec<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
}

impl ExplainRequest {
    /// Check field constraints and convert into an analysis request.
    pub fn into_analysis(self) -> Result<AnalysisRequest, AppError> {
        if self.fen.chars().count() < MIN_FEN_LEN {
            return Err(AppError::Unprocessable(format!(
                "fen: String should have at least {MIN_FEN_LEN} characters"
            )));
        }
        let audience = self
            .target_audience
            .unwrap_or_else(|| DEFAULT_AUDIENCE.to_string());
        Ok(AnalysisRequest::new(self.fen, self.moves).with_audience(audience))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub success: bool,
    pub explanation: Option<String>,
    pub error: Option<String>,
    pub best_move: Option<String>,
    pub score: Option<i32>,
    #[serde(default)]
    pub skipped_moves: Vec<String>,
}

impl From<AnalysisResult> for ExplainResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            success: result.succeeded,
            explanation: result.explanation,
            error: result.error_message,
            best_move: result.recommended_move,
            score: result.recommended_score,
            skipped_moves: result.skipped_moves,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub engine_path: Option<String>,
    pub llm_provider: String,
    pub llm_available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_fen_rejected() {
        let req = ExplainRequest {
            fen: "8/8/8".to_string(),
            moves: vec![],
            target_audience: None,
        };
        assert!(matches!(req.into_analysis(), Err(AppError::Unprocessable(_))));
    }

    #[test]
    fn test_audience_defaults_to_beginner() {
        let req: ExplainRequest = serde_json::from_str(
            r#"{"fen":"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1","moves":["e2e4"]}"#,
        )
        .unwrap();
        let analysis = req.into_analysis().unwrap();
        assert_eq!(analysis.audience_level, "beginner");
        assert_eq!(analysis.candidate_moves, vec!["e2e4"]);
    }

    #[test]
    fn test_response_field_names() {
        let result = AnalysisResult::success("text".into(), Some(("d2d4".into(), 35)), vec![]);
        let json = serde_json::to_value(ExplainResponse::from(result)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["best_move"], "d2d4");
        assert_eq!(json["score"], 35);
        assert!(json["error"].is_null());
    }
}
