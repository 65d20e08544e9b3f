use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use chess::{annotate_line, format_fen, parse_fen, resolve_legal_move, terminal_status};
use chess::{Evaluation, Score, Terminal};
use cozy_chess::Board;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout};
use tokio::sync::Mutex;

use crate::uci::{parse_uci_message, UciError, UciMessage};
use crate::{EngineError, EngineInfo, PositionEvaluator, UciScore};

/// How long to wait for `uciok` / `readyok` after spawning.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Stockfish process.
#[derive(Debug, Clone)]
pub struct StockfishConfig {
    /// Explicit executable path; common install locations are searched when unset.
    pub path: Option<PathBuf>,
    pub skill_level: Option<u8>,
    pub threads: Option<u32>,
    pub hash_mb: Option<u32>,
    /// Upper bound for a single `go depth N` search.
    pub search_timeout: Duration,
}

impl Default for StockfishConfig {
    fn default() -> Self {
        Self {
            path: None,
            skill_level: None,
            threads: Some(1),
            hash_mb: Some(64),
            search_timeout: Duration::from_secs(30),
        }
    }
}

/// One running engine process speaking UCI over stdin/stdout.
struct UciSession {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Result of one `go` command.
struct SearchOutcome {
    score: Option<UciScore>,
    pv: Vec<String>,
}

impl UciSession {
    #[tracing::instrument(level = "info", skip(config))]
    async fn spawn(path: &Path, config: &StockfishConfig) -> Result<Self, UciError> {
        tracing::debug!("Spawning Stockfish process");
        let mut process = tokio::process::Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                tracing::error!("Failed to spawn Stockfish: {}", e);
                e
            })?;

        let stdin = process.stdin.take().ok_or(UciError::NoStdin)?;
        let stdout = process.stdout.take().ok_or(UciError::NoStdout)?;
        let mut session = Self {
            process,
            stdin,
            stdout: BufReader::new(stdout),
        };

        session.send("uci").await?;
        session.handshake(|msg| matches!(msg, UciMessage::UciOk)).await?;
        tracing::debug!("Received uciok");

        if let Some(level) = config.skill_level {
            tracing::info!("Setting skill level to {}", level);
            session
                .send(&format!("setoption name Skill Level value {}", level.min(20)))
                .await?;
        }
        if let Some(threads) = config.threads {
            let threads = threads.clamp(1, 16);
            tracing::info!("Setting Threads to {}", threads);
            session
                .send(&format!("setoption name Threads value {}", threads))
                .await?;
        }
        if let Some(hash_mb) = config.hash_mb {
            let hash_mb = hash_mb.clamp(1, 2048);
            tracing::info!("Setting Hash to {} MB", hash_mb);
            session
                .send(&format!("setoption name Hash value {}", hash_mb))
                .await?;
        }

        session.send("isready").await?;
        session.handshake(|msg| matches!(msg, UciMessage::ReadyOk)).await?;

        tracing::info!("Stockfish engine spawned and initialized successfully");
        Ok(session)
    }

    async fn send(&mut self, cmd: &str) -> Result<(), UciError> {
        tracing::trace!("UCI >> {}", cmd);
        self.stdin.write_all(cmd.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Next parseable message; unparseable lines are skipped.
    async fn next_message(&mut self) -> Result<UciMessage, UciError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.stdout.read_line(&mut line).await? == 0 {
                tracing::warn!("Stockfish stdout EOF - engine closed");
                return Err(UciError::Closed);
            }
            let trimmed = line.trim();
            tracing::trace!("UCI << {}", trimmed);
            match parse_uci_message(trimmed) {
                Ok(msg) => return Ok(msg),
                Err(UciError::UnknownMessage(_)) => continue,
                Err(e) => return Err(e),
            }
        }
    }

    async fn handshake(&mut self, done: impl Fn(&UciMessage) -> bool) -> Result<(), UciError> {
        let wait = async {
            loop {
                let msg = self.next_message().await?;
                if done(&msg) {
                    return Ok::<(), UciError>(());
                }
            }
        };
        match tokio::time::timeout(HANDSHAKE_TIMEOUT, wait).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("Timeout waiting for engine handshake");
                Err(UciError::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "timeout waiting for engine to respond",
                )))
            }
        }
    }

    async fn search(&mut self, fen: &str, depth: u32) -> Result<SearchOutcome, UciError> {
        self.send(&format!("position fen {}", fen)).await?;
        self.send(&format!("go depth {}", depth)).await?;

        // Collect engine output until BestMove
        let mut outcome = SearchOutcome {
            score: None,
            pv: Vec::new(),
        };
        let mut stats = EngineInfo::default();
        loop {
            match self.next_message().await? {
                UciMessage::Info(info) if info.multipv.unwrap_or(1) == 1 => {
                    if let Some(score) = info.score {
                        outcome.score = Some(score);
                    }
                    stats.update_stats(&info);
                    if !info.pv.is_empty() {
                        outcome.pv = info.pv;
                    }
                }
                UciMessage::BestMove { mv, .. } => {
                    tracing::debug!(
                        bestmove = ?mv,
                        score = ?outcome.score,
                        depth = ?stats.depth,
                        seldepth = ?stats.seldepth,
                        nodes = ?stats.nodes,
                        nps = ?stats.nps,
                        time_ms = ?stats.time_ms,
                        "Search finished"
                    );
                    return Ok(outcome);
                }
                _ => continue,
            }
        }
    }

    async fn quit(mut self) {
        let _ = self.send("quit").await;
        let _ = tokio::time::timeout(Duration::from_secs(1), self.process.wait()).await;
        let _ = self.process.kill().await;
    }
}

/// Stockfish-backed [`PositionEvaluator`].
///
/// Owns at most one engine process, started on first use. Every call holds
/// the process lock for its whole duration, so concurrent callers are served
/// one at a time. A process that fails or times out is discarded and a fresh
/// one is spawned on the next call.
pub struct StockfishEngine {
    config: StockfishConfig,
    path: Option<PathBuf>,
    session: Mutex<Option<UciSession>>,
}

impl StockfishEngine {
    /// Create the engine handle. Without an explicit path, common install
    /// locations are probed; no process is kept running until first use.
    pub async fn new(config: StockfishConfig) -> Self {
        let path = match config.path.clone() {
            Some(p) => Some(p),
            None => find_stockfish_path().await,
        };
        match &path {
            Some(p) => tracing::info!("Using Stockfish at: {:?}", p),
            None => tracing::warn!("Stockfish not found; analysis requests will fail"),
        }
        Self {
            config,
            path,
            session: Mutex::new(None),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn is_running(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Start the engine process now instead of on the first evaluation.
    pub async fn start(&self) -> Result<(), EngineError> {
        let mut guard = self.session.lock().await;
        self.ensure_started(&mut guard).await?;
        Ok(())
    }

    /// Terminate the engine process. Safe to call more than once.
    pub async fn shutdown(&self) {
        if let Some(session) = self.session.lock().await.take() {
            tracing::info!("Shutting down Stockfish");
            session.quit().await;
        }
    }

    async fn ensure_started<'a>(
        &self,
        slot: &'a mut Option<UciSession>,
    ) -> Result<&'a mut UciSession, EngineError> {
        if slot.is_none() {
            let path = self
                .path
                .as_deref()
                .ok_or_else(|| EngineError::Unavailable("Stockfish not found".to_string()))?;
            let session = UciSession::spawn(path, &self.config)
                .await
                .map_err(|e| EngineError::Unavailable(format!("Failed to start Stockfish: {}", e)))?;
            *slot = Some(session);
        }
        slot.as_mut()
            .ok_or_else(|| EngineError::Unavailable("Stockfish not running".to_string()))
    }

    /// Run one bounded search; the session is dropped on any failure.
    async fn search(
        &self,
        slot: &mut Option<UciSession>,
        fen: &str,
        depth: u32,
    ) -> Result<SearchOutcome, EngineError> {
        let session = self.ensure_started(slot).await?;
        let timeout = self.config.search_timeout;
        let result = match tokio::time::timeout(timeout, session.search(fen, depth)).await {
            Ok(Ok(outcome)) => return Ok(outcome),
            Ok(Err(e)) => EngineError::from(e),
            Err(_) => EngineError::Timeout(timeout.as_secs()),
        };
        tracing::warn!("Discarding engine process after failure: {}", result);
        *slot = None;
        Err(result)
    }
}

#[async_trait]
impl PositionEvaluator for StockfishEngine {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn evaluate(&self, fen: &str, depth: u32) -> Result<Evaluation, EngineError> {
        let board = load_board(fen)?;

        if let Some(terminal) = terminal_status(&board) {
            tracing::debug!(?terminal, "Terminal position, skipping engine search");
            return build_evaluation(terminal_score(terminal), depth, Vec::new());
        }

        let mut slot = self.session.lock().await;
        let outcome = self.search(&mut slot, fen, depth).await?;
        let score = outcome.score.ok_or_else(|| {
            EngineError::AnalysisFailed(format!("Engine returned no score for {}", fen))
        })?;

        build_evaluation(score.into(), depth, annotate_line(&board, &outcome.pv))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn analyze_candidates(
        &self,
        fen: &str,
        moves: &[String],
        depth: u32,
    ) -> Result<HashMap<String, Evaluation>, EngineError> {
        let board = load_board(fen)?;
        let mut results = HashMap::with_capacity(moves.len());
        let mut slot = self.session.lock().await;

        for move_text in moves {
            let Some(mv) = resolve_legal_move(&board, move_text) else {
                tracing::debug!(mv = %move_text, "Skipping unparsable or illegal move");
                continue;
            };

            let mut after = board.clone();
            after.play_unchecked(mv);

            let evaluation = match terminal_status(&after) {
                Some(Terminal::Checkmate) => build_evaluation(Score::mate(1), depth, Vec::new())?,
                Some(Terminal::Stalemate) => {
                    build_evaluation(Score::centipawns(0), depth, Vec::new())?
                }
                None => {
                    let outcome = self.search(&mut slot, &format_fen(&after), depth).await?;
                    let score = outcome.score.ok_or_else(|| {
                        EngineError::AnalysisFailed(format!(
                            "Engine returned no score for move {}",
                            move_text
                        ))
                    })?;
                    build_evaluation(
                        mover_perspective(score),
                        depth,
                        annotate_line(&after, &outcome.pv),
                    )?
                }
            };

            tracing::debug!(mv = %move_text, score = %evaluation.score, "Candidate evaluated");
            results.insert(move_text.clone(), evaluation);
        }

        Ok(results)
    }
}

fn load_board(fen: &str) -> Result<Board, EngineError> {
    parse_fen(fen).map_err(|_| EngineError::AnalysisFailed(format!("Invalid FEN: {}", fen)))
}

fn build_evaluation(
    score: Score,
    depth: u32,
    pv: Vec<chess::Move>,
) -> Result<Evaluation, EngineError> {
    Evaluation::new(score, depth, pv).map_err(|e| EngineError::AnalysisFailed(e.to_string()))
}

/// Score of a terminal position for the side to move.
fn terminal_score(terminal: Terminal) -> Score {
    match terminal {
        Terminal::Checkmate => Score::mate(0),
        Terminal::Stalemate => Score::centipawns(0),
    }
}

/// Convert a score reported after the candidate move (opponent to move) into
/// the mover's perspective, counting mate distance from before the move.
fn mover_perspective(score: UciScore) -> Score {
    match score {
        UciScore::Centipawns(cp) => Score::centipawns(-cp),
        // opponent is mated in |n|; the candidate itself is one more move
        UciScore::Mate(n) if n <= 0 => Score::mate(-n + 1),
        UciScore::Mate(n) => Score::mate(-n),
    }
}

/// Find Stockfish executable in common locations
pub async fn find_stockfish_path() -> Option<PathBuf> {
    let paths = [
        "/usr/local/bin/stockfish",
        "/usr/bin/stockfish",
        "/opt/homebrew/bin/stockfish",
        "/usr/games/stockfish",
        "stockfish", // In PATH
    ];

    for path_str in paths {
        let path = Path::new(path_str);
        if path.exists() || path_str == "stockfish" {
            // Try to verify it's actually runnable
            let probe = tokio::process::Command::new(path_str)
                .arg("quit")
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .status()
                .await;
            if probe.is_ok() {
                return Some(PathBuf::from(path_str));
            }
        }
    }

    None
}
