//! Groq cloud client (OpenAI-compatible chat completions).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::context::ExplanationContext;
use crate::error::{ExplainError, ExplainResult};
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::retry::{call_with_retry, RetryPolicy};
use crate::Explainer;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GROQ_MODEL.to_string(),
            base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct GroqExplainer {
    client: Client,
    config: GroqConfig,
}

impl GroqExplainer {
    pub fn new(config: GroqConfig) -> ExplainResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExplainError::NotConfigured(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_key(&self) -> ExplainResult<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ExplainError::NotConfigured(
                    "Groq API key not configured. Set GROQ_API_KEY environment variable."
                        .to_string(),
                )
            })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> ExplainResult<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.7,
            max_tokens: 1024,
        };

        let resp = self
            .client
            .post(self.url("/chat/completions"))
            .bearer_auth(api_key)
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

        let parsed: ChatResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ExplainError::InvalidResponse("no completion returned".to_string()))
    }
}

#[async_trait]
impl Explainer for GroqExplainer {
    #[tracing::instrument(level = "debug", skip_all, fields(model = %self.config.model))]
    async fn explain(&self, context: &ExplanationContext) -> ExplainResult<String> {
        context.validate()?;
        let api_key = self.api_key()?;
        let prompt = build_prompt(context);
        tracing::debug!(prompt_len = prompt.len(), "Requesting explanation from Groq");

        call_with_retry(
            &self.config.retry,
            || self.complete(api_key, &prompt),
            ExplainError::is_retryable,
        )
        .await
    }

    async fn is_available(&self) -> bool {
        let Ok(api_key) = self.api_key() else {
            return false;
        };
        match self
            .client
            .get(self.url("/models"))
            .bearer_auth(api_key)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::debug!("Groq not reachable: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_context, serve};
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    fn config(base_url: String, api_key: Option<&str>) -> GroqConfig {
        GroqConfig {
            api_key: api_key.map(str::to_string),
            base_url,
            retry: RetryPolicy::new(2, Duration::ZERO),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let explainer = GroqExplainer::new(config("http://127.0.0.1:9".to_string(), None)).unwrap();
        let err = explainer.explain(&sample_context()).await.unwrap_err();
        assert!(matches!(err, ExplainError::NotConfigured(_)));
        assert!(err.to_string().contains("GROQ_API_KEY"));
        assert!(!explainer.is_available().await);
    }

    #[tokio::test]
    async fn test_chat_completion() {
        let app = Router::new().route(
            "/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer test-key");
                assert_eq!(body["model"], DEFAULT_GROQ_MODEL);
                assert_eq!(body["max_tokens"], 1024);
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
                assert_eq!(body["messages"][1]["role"], "user");
                Json(json!({
                    "choices": [{ "message": { "role": "assistant", "content": " Develops a piece. " } }]
                }))
            }),
        );
        let base = serve(app).await;

        let explainer = GroqExplainer::new(config(base, Some("test-key"))).unwrap();
        let text = explainer.explain(&sample_context()).await.unwrap();
        assert_eq!(text, "Develops a piece.");
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid_response() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let base = serve(app).await;

        let explainer = GroqExplainer::new(config(base, Some("k"))).unwrap();
        assert!(matches!(
            explainer.explain(&sample_context()).await,
            Err(ExplainError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_is_api_error() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let base = serve(app).await;

        let explainer = GroqExplainer::new(config(base, Some("bad"))).unwrap();
        let err = explainer.explain(&sample_context()).await.unwrap_err();
        assert!(matches!(err, ExplainError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_is_available_lists_models() {
        let app = Router::new().route("/models", get(|| async { Json(json!({ "data": [] })) }));
        let base = serve(app).await;
        let explainer = GroqExplainer::new(config(base, Some("k"))).unwrap();
        assert!(explainer.is_available().await);
    }
}
