//! Position analysis: validates a request, asks the engine for scores, picks
//! the best candidate and has the language model explain the result.

pub mod config;
mod error;
pub mod orchestrator;
mod request;
pub mod selection;
pub mod wiring;

pub use config::AppConfig;
pub use error::AnalysisError;
pub use orchestrator::{FilteredMoves, PositionAnalyzer};
pub use request::{AnalysisRequest, AnalysisResult, DEFAULT_AUDIENCE};
pub use selection::select_best;
pub use wiring::{build_analyzer, build_explainer, DefaultAnalyzer};
