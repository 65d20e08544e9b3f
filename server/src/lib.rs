//! HTTP surface for MoveXplainer: `POST /explain` and `GET /health`.

pub mod error;
pub mod routes;
pub mod schemas;

use std::sync::Arc;

use analysis::PositionAnalyzer;
use axum::{
    routing::{get, post},
    Router,
};
use chess::MoveValidator;
use engine::PositionEvaluator;
use explainer::Explainer;
use tower_http::cors::{Any, CorsLayer};

/// Shared handler state.
pub struct AppState<V, E, X> {
    pub analyzer: PositionAnalyzer<V, E, X>,
    /// Reported by `/health`; `None` when no engine binary was found.
    pub engine_path: Option<String>,
    pub llm_provider: String,
}

pub fn router<V, E, X>(state: Arc<AppState<V, E, X>>) -> Router
where
    V: MoveValidator + 'static,
    E: PositionEvaluator + 'static,
    X: Explainer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::<V, E, X>))
        .route("/explain", post(routes::explain::<V, E, X>))
        .layer(cors)
        .with_state(state)
}
