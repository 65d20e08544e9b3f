//! Mock PositionEvaluator implementation for testing

use crate::{EngineError, PositionEvaluator};
use async_trait::async_trait;
use chess::{Evaluation, Score};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type EvaluateFn = Box<dyn Fn(&str) -> Result<Evaluation, EngineError> + Send>;
type CandidatesFn = Box<dyn Fn(&str, &[String]) -> Result<HashMap<String, Evaluation>, EngineError> + Send>;

/// Mock engine - only compiled in test mode or with mock feature
#[cfg(any(test, feature = "mock"))]
pub struct MockEngine {
    responses: Arc<Mutex<MockResponses>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[cfg(any(test, feature = "mock"))]
#[derive(Default)]
struct MockResponses {
    evaluate: Option<EvaluateFn>,
    analyze_candidates: Option<CandidatesFn>,
    /// Scripted per-move scores used when no candidates closure is set
    candidate_scores: HashMap<String, Score>,
}

#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Evaluate { fen: String, depth: u32 },
    AnalyzeCandidates { fen: String, moves: Vec<String>, depth: u32 },
}

#[cfg(any(test, feature = "mock"))]
impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "mock"))]
impl MockEngine {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(MockResponses::default())),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure evaluate response
    pub fn with_evaluate_response<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Evaluation, EngineError> + Send + 'static,
    {
        self.responses.lock().unwrap().evaluate = Some(Box::new(f));
        self
    }

    /// Baseline evaluation with a fixed score
    pub fn with_baseline(self, score: Score) -> Self {
        self.with_evaluate_response(move |_| Ok(mock_evaluation(score)))
    }

    /// Configure analyze_candidates response
    pub fn with_candidates_response<F>(self, f: F) -> Self
    where
        F: Fn(&str, &[String]) -> Result<HashMap<String, Evaluation>, EngineError> + Send + 'static,
    {
        self.responses.lock().unwrap().analyze_candidates = Some(Box::new(f));
        self
    }

    /// Score returned for `mv`; moves without a score are omitted from results
    pub fn with_candidate(self, mv: &str, score: Score) -> Self {
        self.responses
            .lock()
            .unwrap()
            .candidate_scores
            .insert(mv.to_string(), score);
        self
    }

    /// Get recorded calls for verification
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }
}

/// Evaluation at depth 10 with an empty line.
#[cfg(any(test, feature = "mock"))]
pub fn mock_evaluation(score: Score) -> Evaluation {
    Evaluation {
        score,
        depth: 10,
        pv: Default::default(),
    }
}

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl PositionEvaluator for MockEngine {
    async fn evaluate(&self, fen: &str, depth: u32) -> Result<Evaluation, EngineError> {
        self.call_log.lock().unwrap().push(MockCall::Evaluate {
            fen: fen.to_string(),
            depth,
        });

        let responses = self.responses.lock().unwrap();
        if let Some(ref f) = responses.evaluate {
            f(fen)
        } else {
            Err(EngineError::Unavailable("mock evaluate not configured".to_string()))
        }
    }

    async fn analyze_candidates(
        &self,
        fen: &str,
        moves: &[String],
        depth: u32,
    ) -> Result<HashMap<String, Evaluation>, EngineError> {
        self.call_log.lock().unwrap().push(MockCall::AnalyzeCandidates {
            fen: fen.to_string(),
            moves: moves.to_vec(),
            depth,
        });

        let responses = self.responses.lock().unwrap();
        if let Some(ref f) = responses.analyze_candidates {
            return f(fen, moves);
        }
        Ok(moves
            .iter()
            .filter_map(|mv| {
                responses
                    .candidate_scores
                    .get(mv)
                    .map(|score| (mv.clone(), mock_evaluation(*score)))
            })
            .collect())
    }
}
