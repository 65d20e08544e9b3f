//! Natural-language explanations of chess analysis.
//!
//! Turns a structured [`ExplanationContext`] into a prompt and asks a language
//! model (local Ollama or Groq cloud) to explain it.
//!
//! # Example
//!
//! ```no_run
//! use explainer::{Explainer, OllamaConfig, OllamaExplainer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let llm = OllamaExplainer::new(OllamaConfig::default())?;
//!     println!("Ollama reachable: {}", llm.is_available().await);
//!     Ok(())
//! }
//! ```

mod context;
mod error;
pub mod groq;
pub mod ollama;
pub mod prompt;
mod provider;
pub mod retry;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use context::{CandidateSummary, ExplanationContext};
pub use error::{ExplainError, ExplainResult};
pub use groq::{GroqConfig, GroqExplainer};
pub use ollama::{OllamaConfig, OllamaExplainer};
pub use provider::{LlmExplainer, LlmProvider, UnknownProviderError};
pub use retry::{call_with_retry, RetryPolicy};

use async_trait::async_trait;

/// Explanation service interface
/// Implemented by the real LLM clients and MockExplainer
#[async_trait]
pub trait Explainer: Send + Sync {
    /// Produce explanation text for the context
    async fn explain(&self, context: &ExplanationContext) -> ExplainResult<String>;

    /// Lightweight reachability check; never generates text
    async fn is_available(&self) -> bool;
}

#[async_trait]
impl<T: Explainer + ?Sized> Explainer for std::sync::Arc<T> {
    async fn explain(&self, context: &ExplanationContext) -> ExplainResult<String> {
        (**self).explain(context).await
    }

    async fn is_available(&self) -> bool {
        (**self).is_available().await
    }
}
