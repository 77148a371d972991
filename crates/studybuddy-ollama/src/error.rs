//! Error types for Ollama operations.

use thiserror::Error;

/// Errors that can occur while talking to the Ollama server.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error response.
    #[error("Ollama API error: {0}")]
    Api(String),

    /// Server is not running or not reachable.
    #[error("Ollama server not running at {0}. Start it with: ollama serve")]
    ServerNotRunning(String),

    /// The requested model is not installed on the server.
    #[error("Model '{0}' not found. Pull it with: ollama pull {0}")]
    ModelNotFound(String),
}

impl OllamaError {
    /// Whether this error means the server could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        match self {
            OllamaError::ServerNotRunning(_) => true,
            OllamaError::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
