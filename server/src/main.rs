use std::sync::Arc;

use analysis::{build_analyzer, AppConfig};
use anyhow::Context;
use engine::StockfishEngine;
use movexplainer_server::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing with span durations
    use tracing_subscriber::fmt::format::FmtSpan;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!("Starting MoveXplainer HTTP server");

    let config = AppConfig::from_env();
    let engine = Arc::new(StockfishEngine::new(config.stockfish_config()).await);
    let analyzer = build_analyzer(&config, engine.clone()).context("Failed to configure LLM client")?;

    let state = Arc::new(AppState {
        analyzer,
        engine_path: engine.path().map(|p| p.display().to_string()),
        llm_provider: config.llm_provider.to_string(),
    });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    engine.shutdown().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
