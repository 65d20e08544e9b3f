//! HTTP tests for /explain and /health against mock adapters

use std::sync::Arc;

use analysis::PositionAnalyzer;
use chess::{CozyValidator, Score, START_FEN};
use engine::mock::MockEngine;
use explainer::mock::MockExplainer;
use movexplainer_server::{router, AppState};
use serde_json::{json, Value};

async fn spawn_app(engine: MockEngine, explainer: MockExplainer) -> String {
    let state = Arc::new(AppState {
        analyzer: PositionAnalyzer::new(CozyValidator, engine, explainer),
        engine_path: Some("/usr/bin/stockfish".to_string()),
        llm_provider: "ollama".to_string(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

fn scripted_engine() -> MockEngine {
    MockEngine::new()
        .with_baseline(Score::centipawns(20))
        .with_candidate("e2e4", Score::centipawns(20))
        .with_candidate("d2d4", Score::centipawns(35))
}

async fn post_explain(base: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/explain"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn explain_returns_best_move() {
    let base = spawn_app(scripted_engine(), MockExplainer::new().with_text("d4 takes space.")).await;

    let resp = post_explain(
        &base,
        json!({ "fen": START_FEN, "moves": ["e2e4", "d2d4", "junk"] }),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["explanation"], "d4 takes space.");
    assert_eq!(body["best_move"], "d2d4");
    assert_eq!(body["score"], 35);
    assert!(body["error"].is_null());
    assert_eq!(body["skipped_moves"], json!(["junk"]));
}

#[tokio::test]
async fn invalid_fen_is_reported_in_body() {
    let base = spawn_app(scripted_engine(), MockExplainer::new().with_text("unused")).await;

    let resp = post_explain(
        &base,
        json!({ "fen": "this is not a fen", "moves": ["e2e4"] }),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid FEN string");
    assert!(body["best_move"].is_null());
}

#[tokio::test]
async fn short_fen_is_unprocessable() {
    let base = spawn_app(scripted_engine(), MockExplainer::new()).await;

    let resp = post_explain(&base, json!({ "fen": "8/8", "moves": [] })).await;
    assert_eq!(resp.status(), 422);

    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("at least 10"));
}

#[tokio::test]
async fn missing_moves_field_is_unprocessable() {
    let base = spawn_app(scripted_engine(), MockExplainer::new()).await;

    let resp = post_explain(&base, json!({ "fen": START_FEN })).await;
    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn health_reports_adapters() {
    let base = spawn_app(
        MockEngine::new(),
        MockExplainer::new().with_availability(false),
    )
    .await;

    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["engine_path"], "/usr/bin/stockfish");
    assert_eq!(body["llm_provider"], "ollama");
    assert_eq!(body["llm_available"], false);
}
