//! MoveXplainer CLI.
//!
//! `analyze` runs one position through the engine and the language model and
//! prints the result as JSON on stdout. `check` reports whether the validator,
//! the Stockfish binary and the configured LLM are usable.
//!
//! Configuration comes from the environment (optionally a `.env` file); see
//! [`analysis::AppConfig::from_lookup`] for the variables.

use std::process::ExitCode;
use std::sync::Arc;

use analysis::{build_analyzer, AnalysisRequest, AppConfig, DEFAULT_AUDIENCE};
use clap::{Parser, Subcommand};
use engine::StockfishEngine;

mod check;
mod logging;

#[derive(Parser)]
#[command(name = "movexplainer", about = "Explain chess moves with Stockfish and an LLM")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a position and explain the candidate moves.
    Analyze {
        /// FEN string of the position to analyze.
        #[arg(long)]
        fen: String,

        /// Candidate move in UCI format (e.g. e2e4). Repeat for several moves.
        #[arg(long = "move", value_name = "MOVE")]
        moves: Vec<String>,

        /// Target audience for the explanation.
        #[arg(long, default_value = DEFAULT_AUDIENCE)]
        audience: String,

        /// Override the configured search depth.
        #[arg(long)]
        depth: Option<u32>,
    },
    /// Verify that the validator, the engine and the LLM are reachable.
    Check,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to configure LLM client: {0}")]
    Explainer(#[from] explainer::ExplainError),

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let _log_guard = logging::init(logging::get_log_dir().as_deref())?;

    let config = AppConfig::from_env();
    let engine = Arc::new(StockfishEngine::new(config.stockfish_config()).await);

    let outcome = match cli.command {
        Commands::Analyze {
            fen,
            moves,
            audience,
            depth,
        } => analyze(&config, engine.clone(), fen, moves, audience, depth).await,
        Commands::Check => check(&config, engine.clone()).await,
    };

    engine.shutdown().await;
    Ok(outcome?)
}

async fn analyze(
    config: &AppConfig,
    engine: Arc<StockfishEngine>,
    fen: String,
    moves: Vec<String>,
    audience: String,
    depth: Option<u32>,
) -> Result<ExitCode, CliError> {
    let mut analyzer = build_analyzer(config, engine)?;
    if let Some(depth) = depth {
        analyzer = analyzer.with_depth(depth);
    }

    let request = AnalysisRequest::new(fen, moves).with_audience(audience);
    let result = analyzer.analyze_position(request).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(if result.succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn check(config: &AppConfig, engine: Arc<StockfishEngine>) -> Result<ExitCode, CliError> {
    let analyzer = build_analyzer(config, engine)?;
    let label = format!(
        "{}/{}",
        analyzer.explainer().provider(),
        analyzer.explainer().model()
    );

    let report = check::run_checks(
        analyzer.validator(),
        analyzer.engine(),
        analyzer.explainer(),
        &label,
    )
    .await;
    print!("{}", report);

    Ok(if report.all_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
