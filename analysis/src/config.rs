//! Runtime configuration for MoveXplainer.
//!
//! Every value has a compile-time default and can be overridden through an
//! environment variable. Values are read once at startup; numbers that fail
//! to parse fall back to their default.

use std::path::PathBuf;
use std::time::Duration;

use engine::StockfishConfig;
use explainer::{GroqConfig, LlmProvider, OllamaConfig, RetryPolicy};

/// Default engine search depth.
const DEFAULT_DEPTH: u32 = engine::DEFAULT_DEPTH;

/// Default timeout for one LLM HTTP request (in seconds).
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts for one LLM call.
const DEFAULT_LLM_MAX_RETRIES: u32 = 3;

const DEFAULT_ENGINE_THREADS: u32 = 1;

const DEFAULT_ENGINE_HASH_MB: u32 = 64;

/// Default upper bound for one engine search (in seconds).
const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 30;

const DEFAULT_HOST: &str = "0.0.0.0";

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub stockfish_path: Option<PathBuf>,
    pub llm_provider: LlmProvider,
    pub ollama_host: String,
    pub ollama_model: String,
    pub groq_api_key: Option<String>,
    pub groq_model: String,
    pub depth: u32,
    pub llm_timeout_secs: u64,
    pub llm_max_retries: u32,
    pub engine_threads: u32,
    pub engine_hash_mb: u32,
    pub engine_timeout_secs: u64,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Variables:
    /// - `STOCKFISH_PATH`: engine binary; common locations are searched if unset
    /// - `LLM_PROVIDER`: `ollama` (default) or `groq`
    /// - `OLLAMA_HOST` / `OLLAMA_MODEL`: `http://localhost:11434` / `mistral`
    /// - `GROQ_API_KEY` / `GROQ_MODEL`: none / `llama-3.1-8b-instant`
    /// - `MOVEXPLAINER_DEPTH`: search depth, 15
    /// - `MOVEXPLAINER_LLM_TIMEOUT_SECS`, `MOVEXPLAINER_LLM_MAX_RETRIES`: 30, 3
    /// - `MOVEXPLAINER_ENGINE_THREADS`, `MOVEXPLAINER_ENGINE_HASH_MB`: 1, 64
    /// - `MOVEXPLAINER_ENGINE_TIMEOUT_SECS`: 30
    /// - `HOST` / `PORT`: HTTP bind address, `0.0.0.0` / 8000
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let llm_provider = match text("LLM_PROVIDER") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}; using {}", e, LlmProvider::default());
                LlmProvider::default()
            }),
            None => LlmProvider::default(),
        };

        Self {
            stockfish_path: text("STOCKFISH_PATH").map(PathBuf::from),
            llm_provider,
            ollama_host: text("OLLAMA_HOST")
                .unwrap_or_else(|| explainer::ollama::DEFAULT_OLLAMA_HOST.to_string()),
            ollama_model: text("OLLAMA_MODEL")
                .unwrap_or_else(|| explainer::ollama::DEFAULT_OLLAMA_MODEL.to_string()),
            groq_api_key: text("GROQ_API_KEY"),
            groq_model: text("GROQ_MODEL")
                .unwrap_or_else(|| explainer::groq::DEFAULT_GROQ_MODEL.to_string()),
            depth: parse_or(text("MOVEXPLAINER_DEPTH"), DEFAULT_DEPTH).max(1),
            llm_timeout_secs: parse_or(text("MOVEXPLAINER_LLM_TIMEOUT_SECS"), DEFAULT_LLM_TIMEOUT_SECS),
            llm_max_retries: parse_or(text("MOVEXPLAINER_LLM_MAX_RETRIES"), DEFAULT_LLM_MAX_RETRIES),
            engine_threads: parse_or(text("MOVEXPLAINER_ENGINE_THREADS"), DEFAULT_ENGINE_THREADS),
            engine_hash_mb: parse_or(text("MOVEXPLAINER_ENGINE_HASH_MB"), DEFAULT_ENGINE_HASH_MB),
            engine_timeout_secs: parse_or(
                text("MOVEXPLAINER_ENGINE_TIMEOUT_SECS"),
                DEFAULT_ENGINE_TIMEOUT_SECS,
            ),
            host: text("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(text("PORT"), DEFAULT_PORT),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn stockfish_config(&self) -> StockfishConfig {
        StockfishConfig {
            path: self.stockfish_path.clone(),
            skill_level: None,
            threads: Some(self.engine_threads),
            hash_mb: Some(self.engine_hash_mb),
            search_timeout: Duration::from_secs(self.engine_timeout_secs),
        }
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.llm_max_retries,
            ..RetryPolicy::default()
        }
    }

    pub fn ollama_config(&self) -> OllamaConfig {
        OllamaConfig {
            host: self.ollama_host.clone(),
            model: self.ollama_model.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
            retry: self.retry_policy(),
        }
    }

    pub fn groq_config(&self) -> GroqConfig {
        GroqConfig {
            api_key: self.groq_api_key.clone(),
            model: self.groq_model.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
            retry: self.retry_policy(),
            ..GroqConfig::default()
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
