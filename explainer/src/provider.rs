//! Provider selection and dispatch.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::context::ExplanationContext;
use crate::error::ExplainResult;
use crate::groq::GroqExplainer;
use crate::ollama::OllamaExplainer;
use crate::Explainer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    #[default]
    Ollama,
    Groq,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown LLM provider '{0}' (expected 'ollama' or 'groq')")]
pub struct UnknownProviderError(pub String);

impl FromStr for LlmProvider {
    type Err = UnknownProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "groq" => Ok(Self::Groq),
            other => Err(UnknownProviderError(other.to_string())),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ollama => f.write_str("ollama"),
            Self::Groq => f.write_str("groq"),
        }
    }
}

/// Configured LLM backend.
pub enum LlmExplainer {
    Ollama(OllamaExplainer),
    Groq(GroqExplainer),
}

impl LlmExplainer {
    pub fn provider(&self) -> LlmProvider {
        match self {
            Self::Ollama(_) => LlmProvider::Ollama,
            Self::Groq(_) => LlmProvider::Groq,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Self::Ollama(inner) => inner.model(),
            Self::Groq(inner) => inner.model(),
        }
    }
}

#[async_trait]
impl Explainer for LlmExplainer {
    async fn explain(&self, context: &ExplanationContext) -> ExplainResult<String> {
        match self {
            Self::Ollama(inner) => inner.explain(context).await,
            Self::Groq(inner) => inner.explain(context).await,
        }
    }

    async fn is_available(&self) -> bool {
        match self {
            Self::Ollama(inner) => inner.is_available().await,
            Self::Groq(inner) => inner.is_available().await,
        }
    }
}
