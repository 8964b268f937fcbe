//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::ExamError;

/// Errors emitted by question and analysis providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("generative provider is not configured")]
    Disabled,
    #[error("provider returned an empty response")]
    EmptyResponse,
    #[error("provider request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    /// Message shown on the subject screen when a question load fails.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            ProviderError::Disabled => {
                "Question generation is not configured. Set EXAM_AI_API_KEY and try again."
            }
            _ => "Could not load questions. Check your API key or connection.",
        }
    }
}

/// Errors emitted by `ExamController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("questions are already being generated")]
    LoadInProgress,
    #[error("could not load questions: {0}")]
    Load(#[source] ProviderError),
    #[error("provider returned no usable questions")]
    NoQuestions,
    #[error("session already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Exam(ExamError),
}

impl From<ExamError> for ControllerError {
    fn from(err: ExamError) -> Self {
        match err {
            ExamError::AlreadySubmitted => ControllerError::AlreadySubmitted,
            ExamError::NoQuestions => ControllerError::NoQuestions,
            other => ControllerError::Exam(other),
        }
    }
}
