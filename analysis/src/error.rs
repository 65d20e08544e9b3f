use engine::EngineError;
use explainer::ExplainError;
use thiserror::Error;

/// Failure inside one analysis. Only the message reaches callers.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    AdapterUnavailable(String),

    #[error("{0}")]
    InvalidData(String),
}

impl From<EngineError> for AnalysisError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Unavailable(_) | EngineError::Timeout(_) => {
                Self::AdapterUnavailable(e.to_string())
            }
            EngineError::AnalysisFailed(_) => Self::InvalidData(e.to_string()),
        }
    }
}

impl From<ExplainError> for AnalysisError {
    fn from(e: ExplainError) -> Self {
        match e {
            ExplainError::InvalidContext(_) => Self::InvalidInput(e.to_string()),
            ExplainError::InvalidResponse(_) => Self::InvalidData(e.to_string()),
            ExplainError::ServiceUnavailable(_)
            | ExplainError::Api { .. }
            | ExplainError::NotConfigured(_) => Self::AdapterUnavailable(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_keep_message() {
        let err = AnalysisError::from(EngineError::Timeout(30));
        assert_eq!(err, AnalysisError::AdapterUnavailable("Engine search timed out after 30s".into()));
        assert!(matches!(
            AnalysisError::from(EngineError::AnalysisFailed("bad".into())),
            AnalysisError::InvalidData(_)
        ));
    }

    #[test]
    fn test_explain_errors() {
        let err = AnalysisError::from(ExplainError::NotConfigured("Set GROQ_API_KEY".into()));
        assert_eq!(err.to_string(), "Set GROQ_API_KEY");
        assert!(matches!(
            AnalysisError::from(ExplainError::InvalidResponse("empty".into())),
            AnalysisError::InvalidData(_)
        ));
    }
}
