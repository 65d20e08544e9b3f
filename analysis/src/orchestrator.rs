//! Request → validate → evaluate → select → explain.

use std::collections::HashMap;

use chess::{format_move_as_san, parse_fen, resolve_legal_move, Evaluation, MoveValidator};
use cozy_chess::Board;
use engine::{PositionEvaluator, DEFAULT_DEPTH};
use explainer::{CandidateSummary, Explainer, ExplanationContext};

use crate::error::AnalysisError;
use crate::request::{AnalysisRequest, AnalysisResult};
use crate::selection::select_best;

const INVALID_FEN: &str = "Invalid FEN string";
const NO_VALID_MOVES: &str = "No valid moves provided";

/// Candidate moves after validation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FilteredMoves {
    /// Canonical moves, first occurrence order, no duplicates.
    pub valid: Vec<String>,
    /// Input strings that failed sanitizing or legality checks.
    pub skipped: Vec<String>,
}

/// Analyzes one position per call; holds no per-request state.
pub struct PositionAnalyzer<V, E, X> {
    validator: V,
    engine: E,
    explainer: X,
    depth: u32,
}

impl<V, E, X> PositionAnalyzer<V, E, X>
where
    V: MoveValidator,
    E: PositionEvaluator,
    X: Explainer,
{
    pub fn new(validator: V, engine: E, explainer: X) -> Self {
        Self {
            validator,
            engine,
            explainer,
            depth: DEFAULT_DEPTH,
        }
    }

    /// Search depth for every engine call; at least 1.
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth.max(1);
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn explainer(&self) -> &X {
        &self.explainer
    }

    /// Run the full analysis. Never fails: every error is reported through
    /// [`AnalysisResult::failure`].
    #[tracing::instrument(
        level = "info",
        skip_all,
        fields(fen = %request.position, moves = request.candidate_moves.len())
    )]
    pub async fn analyze_position(&self, request: AnalysisRequest) -> AnalysisResult {
        match self.run(&request).await {
            Ok(result) => {
                tracing::info!(
                    best_move = ?result.recommended_move,
                    score = ?result.recommended_score,
                    "Analysis completed"
                );
                result
            }
            Err(e) => {
                tracing::warn!("Analysis failed: {}", e);
                AnalysisResult::failure(e.to_string())
            }
        }
    }

    /// Sanitize and legality-check candidates, keeping input order.
    pub fn filter_moves(&self, fen: &str, candidates: &[String]) -> FilteredMoves {
        let mut filtered = FilteredMoves::default();

        for raw in candidates {
            let canonical = match self.validator.sanitize_move(raw) {
                Ok(mv) => mv,
                Err(e) => {
                    tracing::debug!(mv = %raw, "Dropping move: {}", e);
                    filtered.skipped.push(raw.clone());
                    continue;
                }
            };

            match self.validator.validate_move(fen, &canonical) {
                Ok(true) => {
                    if !filtered.valid.contains(&canonical) {
                        filtered.valid.push(canonical);
                    }
                }
                Ok(false) => {
                    tracing::debug!(mv = %raw, "Dropping illegal move");
                    filtered.skipped.push(raw.clone());
                }
                Err(e) => {
                    tracing::debug!(mv = %raw, "Dropping move: {}", e);
                    filtered.skipped.push(raw.clone());
                }
            }
        }

        filtered
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let fen = request.position.trim();
        if !self.validator.validate_fen(fen) {
            return Err(AnalysisError::InvalidInput(INVALID_FEN.to_string()));
        }
        tracing::debug!("State: Validated");

        let FilteredMoves { valid, mut skipped } = self.filter_moves(fen, &request.candidate_moves);
        if valid.is_empty() {
            return Err(AnalysisError::InvalidInput(NO_VALID_MOVES.to_string()));
        }

        let baseline = self.engine.evaluate(fen, self.depth).await?;
        let evaluations = self
            .engine
            .analyze_candidates(fen, &valid, self.depth)
            .await?;
        tracing::debug!(
            baseline = %baseline.score,
            evaluated = evaluations.len(),
            "State: Evaluated"
        );

        skipped.extend(
            valid
                .iter()
                .filter(|mv| !evaluations.contains_key(*mv))
                .cloned(),
        );

        let recommendation = select_best(&valid, &evaluations)
            .map(|(mv, score)| (mv.to_string(), score));

        let context = build_context(fen, baseline, &valid, &evaluations, &request.audience_level);
        let explanation = self.explainer.explain(&context).await?;
        tracing::debug!(len = explanation.len(), "State: Explained");

        Ok(AnalysisResult::success(explanation, recommendation, skipped))
    }
}

/// Structured explanation input: baseline plus every evaluated candidate in
/// filtered order.
fn build_context(
    fen: &str,
    baseline: Evaluation,
    moves: &[String],
    evaluations: &HashMap<String, Evaluation>,
    audience: &str,
) -> ExplanationContext {
    let board = parse_fen(fen).ok();

    let candidates = moves
        .iter()
        .filter_map(|mv| {
            let eval = evaluations.get(mv)?;
            Some(CandidateSummary::new(
                mv.clone(),
                board.as_ref().and_then(|b| candidate_san(b, mv)),
                eval.clone(),
            ))
        })
        .collect();

    ExplanationContext {
        fen: fen.to_string(),
        side_to_move: side_to_move(fen).to_string(),
        baseline,
        candidates,
        audience: audience.to_string(),
    }
}

fn candidate_san(board: &Board, mv: &str) -> Option<String> {
    resolve_legal_move(board, mv).map(|m| format_move_as_san(board, m))
}

fn side_to_move(fen: &str) -> &'static str {
    match fen.split_whitespace().nth(1) {
        Some("b") => "Black",
        _ => "White",
    }
}
