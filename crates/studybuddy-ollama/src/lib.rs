//! Ollama client for the study buddy tutor.
//!
//! Speaks the two endpoints the tutor needs: `/api/tags` to discover the
//! installed models and `/api/generate` in streaming mode to produce text.
//! Streaming responses are newline-delimited JSON and are decoded
//! incrementally, so callers see text as soon as the server produces it.

mod client;
mod error;
mod stream;
mod types;

pub use client::{ChunkStream, OllamaClient};
pub use error::OllamaError;
pub use types::{GenerateChunk, LocalModel, ModelEntry};

/// Default Ollama server URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
