//! Mock Explainer implementation for testing

use crate::context::ExplanationContext;
use crate::error::{ExplainError, ExplainResult};
use crate::Explainer;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

type ExplainFn = Box<dyn Fn(&ExplanationContext) -> ExplainResult<String> + Send>;

/// Mock explainer - only compiled in test mode or with mock feature
#[cfg(any(test, feature = "mock"))]
pub struct MockExplainer {
    response: Arc<Mutex<Option<ExplainFn>>>,
    available: bool,
    call_log: Arc<Mutex<Vec<ExplanationContext>>>,
}

#[cfg(any(test, feature = "mock"))]
impl Default for MockExplainer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "mock"))]
impl MockExplainer {
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new(None)),
            available: true,
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure explain response
    pub fn with_response<F>(self, f: F) -> Self
    where
        F: Fn(&ExplanationContext) -> ExplainResult<String> + Send + 'static,
    {
        *self.response.lock().unwrap() = Some(Box::new(f));
        self
    }

    /// Always answer with the same text
    pub fn with_text(self, text: &str) -> Self {
        let text = text.to_string();
        self.with_response(move |_| Ok(text.clone()))
    }

    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Get recorded contexts for verification
    pub fn get_calls(&self) -> Vec<ExplanationContext> {
        self.call_log.lock().unwrap().clone()
    }
}

#[cfg(any(test, feature = "mock"))]
#[async_trait]
impl Explainer for MockExplainer {
    async fn explain(&self, context: &ExplanationContext) -> ExplainResult<String> {
        self.call_log.lock().unwrap().push(context.clone());

        let response = self.response.lock().unwrap();
        if let Some(ref f) = *response {
            f(context)
        } else {
            Err(ExplainError::NotConfigured("mock explain".to_string()))
        }
    }

    async fn is_available(&self) -> bool {
        self.available
    }
}
