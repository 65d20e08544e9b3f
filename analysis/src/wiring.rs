//! Construction of the production analyzer from configuration.

use std::sync::Arc;

use chess::CozyValidator;
use engine::StockfishEngine;
use explainer::{ExplainResult, GroqExplainer, LlmExplainer, LlmProvider, OllamaExplainer};

use crate::config::AppConfig;
use crate::orchestrator::PositionAnalyzer;

/// Analyzer over the real adapters. The engine is shared so the binary keeps
/// a handle for shutdown.
pub type DefaultAnalyzer = PositionAnalyzer<CozyValidator, Arc<StockfishEngine>, LlmExplainer>;

/// LLM client for the configured provider.
pub fn build_explainer(config: &AppConfig) -> ExplainResult<LlmExplainer> {
    let explainer = match config.llm_provider {
        LlmProvider::Ollama => LlmExplainer::Ollama(OllamaExplainer::new(config.ollama_config())?),
        LlmProvider::Groq => LlmExplainer::Groq(GroqExplainer::new(config.groq_config())?),
    };
    tracing::info!(
        provider = %explainer.provider(),
        model = explainer.model(),
        "LLM explainer configured"
    );
    Ok(explainer)
}

pub fn build_analyzer(
    config: &AppConfig,
    engine: Arc<StockfishEngine>,
) -> ExplainResult<DefaultAnalyzer> {
    let explainer = build_explainer(config)?;
    Ok(PositionAnalyzer::new(CozyValidator, engine, explainer).with_depth(config.depth))
}
