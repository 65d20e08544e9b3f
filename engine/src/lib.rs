//! Engine adapter: position evaluation through a UCI engine.

pub mod stockfish;
pub mod uci;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use stockfish::{find_stockfish_path, StockfishConfig, StockfishEngine};
pub use uci::{UciError, UciMessage};

use std::collections::HashMap;

use async_trait::async_trait;
use chess::Evaluation;

/// Default search depth when none is configured.
pub const DEFAULT_DEPTH: u32 = 15;

/// Engine analysis information parsed from one "info" line
#[derive(Debug, Clone, Default)]
pub struct EngineInfo {
    pub depth: Option<u32>,
    pub seldepth: Option<u32>,
    pub time_ms: Option<u64>,
    pub nodes: Option<u64>,
    pub score: Option<UciScore>,
    pub pv: Vec<String>, // Principal variation, raw UCI moves
    pub multipv: Option<u8>,
    pub nps: Option<u64>,
}

impl EngineInfo {
    /// Fold the search statistics of a newer info line into `self`.
    /// Fields the newer line leaves out keep their previous value.
    pub fn update_stats(&mut self, newer: &EngineInfo) {
        self.depth = newer.depth.or(self.depth);
        self.seldepth = newer.seldepth.or(self.seldepth);
        self.nodes = newer.nodes.or(self.nodes);
        self.nps = newer.nps.or(self.nps);
        self.time_ms = newer.time_ms.or(self.time_ms);
    }
}

/// Score as the engine reports it (side to move).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UciScore {
    Centipawns(i32),
    Mate(i32), // Negative for being mated
}

impl From<UciScore> for chess::Score {
    fn from(score: UciScore) -> Self {
        match score {
            UciScore::Centipawns(cp) => chess::Score::centipawns(cp),
            UciScore::Mate(m) => chess::Score::mate(m),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Engine unavailable: {0}")]
    Unavailable(String),
    #[error("Engine analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("Engine search timed out after {0}s")]
    Timeout(u64),
}

impl From<UciError> for EngineError {
    fn from(e: UciError) -> Self {
        match e {
            UciError::Io(_) | UciError::NoStdin | UciError::NoStdout | UciError::Closed => {
                Self::Unavailable(e.to_string())
            }
            other => Self::AnalysisFailed(other.to_string()),
        }
    }
}

/// Engine adapter consumed by the analyzer.
#[async_trait]
pub trait PositionEvaluator: Send + Sync {
    /// Evaluate `fen` from the side to move's perspective.
    async fn evaluate(&self, fen: &str, depth: u32) -> Result<Evaluation, EngineError>;

    /// Evaluate the position after each candidate move, scored for the side
    /// that plays it. Unparsable or illegal candidates are omitted.
    async fn analyze_candidates(
        &self,
        fen: &str,
        moves: &[String],
        depth: u32,
    ) -> Result<HashMap<String, Evaluation>, EngineError>;
}

#[async_trait]
impl<T: PositionEvaluator + ?Sized> PositionEvaluator for std::sync::Arc<T> {
    async fn evaluate(&self, fen: &str, depth: u32) -> Result<Evaluation, EngineError> {
        (**self).evaluate(fen, depth).await
    }

    async fn analyze_candidates(
        &self,
        fen: &str,
        moves: &[String],
        depth: u32,
    ) -> Result<HashMap<String, Evaluation>, EngineError> {
        (**self).analyze_candidates(fen, moves, depth).await
    }
}
