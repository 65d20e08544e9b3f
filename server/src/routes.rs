use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chess::MoveValidator;
use engine::PositionEvaluator;
use explainer::Explainer;
use uuid::Uuid;

use crate::error::AppError;
use crate::schemas::{ExplainRequest, ExplainResponse, HealthResponse};
use crate::AppState;

/// POST /explain
#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn explain<V, E, X>(
    State(state): State<Arc<AppState<V, E, X>>>,
    payload: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, AppError>
where
    V: MoveValidator + 'static,
    E: PositionEvaluator + 'static,
    X: Explainer + 'static,
{
    let Json(body) = payload?;
    tracing::info!("Received explanation request for FEN: {}", body.fen);

    let request = body.into_analysis()?;
    let result = state.analyzer.analyze_position(request).await;
    if !result.succeeded {
        tracing::warn!("Analysis failed: {:?}", result.error_message);
    }

    Ok(Json(result.into()))
}

/// GET /health
pub async fn health<V, E, X>(State(state): State<Arc<AppState<V, E, X>>>) -> Json<HealthResponse>
where
    V: MoveValidator + 'static,
    E: PositionEvaluator + 'static,
    X: Explainer + 'static,
{
    let llm_available = state.analyzer.explainer().is_available().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        engine_path: state.engine_path.clone(),
        llm_provider: state.llm_provider.clone(),
        llm_available,
    })
}
