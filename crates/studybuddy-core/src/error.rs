//! Error types for the tutor core.

use studybuddy_ollama::OllamaError;
use thiserror::Error;

/// Errors raised by the inference backend.
///
/// These never leave the model directory or the response streamer; they are
/// turned into notifications or diagnostic text there.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("model '{0}' is not installed")]
    ModelNotFound(String),
    #[error("{0}")]
    Api(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<OllamaError> for BackendError {
    fn from(e: OllamaError) -> Self {
        if e.is_unreachable() {
            return BackendError::Unreachable(e.to_string());
        }
        match e {
            OllamaError::ModelNotFound(model) => BackendError::ModelNotFound(model),
            OllamaError::Json(e) => BackendError::Malformed(e.to_string()),
            other => BackendError::Api(other.to_string()),
        }
    }
}

/// Errors from tutor operations that are the caller's to handle.
#[derive(Debug, Error)]
pub enum TutorError {
    #[error("unknown mode '{0}' (expected: explain, quiz)")]
    InvalidMode(String),
    #[error("unknown education level '{0}'")]
    InvalidLevel(String),
    #[error("unknown subject '{0}'")]
    InvalidSubject(String),
    #[error("Install an Ollama model first!")]
    NoModelSelected,
    #[error("message is empty")]
    EmptyMessage,
}
