//! Local Ollama server client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::context::ExplanationContext;
use crate::error::{ExplainError, ExplainResult};
use crate::prompt::build_prompt;
use crate::retry::{call_with_retry, RetryPolicy};
use crate::Explainer;

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "mistral";

#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub host: String,
    pub model: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OLLAMA_HOST.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct OllamaExplainer {
    client: Client,
    config: OllamaConfig,
}

impl OllamaExplainer {
    pub fn new(config: OllamaConfig) -> ExplainResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExplainError::NotConfigured(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.host.trim_end_matches('/'), path)
    }

    async fn generate(&self, prompt: &str) -> ExplainResult<String> {
        let body = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: 0.7,
                top_p: 0.9,
            },
        };

        let resp = self
            .client
            .post(self.url("/api/generate"))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ExplainError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        let text = parsed.response.trim();
        if text.is_empty() {
            return Err(ExplainError::InvalidResponse("empty response".to_string()));
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl Explainer for OllamaExplainer {
    #[tracing::instrument(level = "debug", skip_all, fields(model = %self.config.model))]
    async fn explain(&self, context: &ExplanationContext) -> ExplainResult<String> {
        context.validate()?;
        let prompt = build_prompt(context);
        tracing::debug!(prompt_len = prompt.len(), "Requesting explanation from Ollama");

        call_with_retry(
            &self.config.retry,
            || self.generate(&prompt),
            ExplainError::is_retryable,
        )
        .await
    }

    async fn is_available(&self) -> bool {
        match self.client.get(self.url("/api/tags")).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!("Ollama not reachable: {}", e);
                false
            }
        }
    }
}
