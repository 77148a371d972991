//! HTTP client for the Ollama API.

use futures_util::stream::{BoxStream, StreamExt};
use reqwest::StatusCode;
use tracing::debug;

use crate::error::OllamaError;
use crate::stream::decode_chunks;
use crate::types::{ErrorResponse, GenerateChunk, GenerateRequest, ModelEntry, TagsResponse};
use crate::DEFAULT_OLLAMA_URL;

/// Stream of decoded generate chunks.
pub type ChunkStream = BoxStream<'static, Result<GenerateChunk, OllamaError>>;

/// Client for communicating with an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a new client with the default URL (localhost:11434).
    pub fn new() -> Self {
        Self::with_url(DEFAULT_OLLAMA_URL)
    }

    /// Create a new client with a custom URL.
    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: normalize_url(&base_url.into()),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the models installed on the server.
    pub async fn list_models(&self) -> Result<Vec<ModelEntry>, OllamaError> {
        let url = format!("{}/api/tags", self.base_url);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let tags: TagsResponse = response.json().await?;
        debug!("Server reported {} model entries", tags.models.len());
        Ok(tags.models)
    }

    /// Start a streaming generation.
    ///
    /// Status errors are reported here; errors that happen once text is
    /// flowing arrive as items of the returned stream.
    pub async fn generate_stream(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<ChunkStream, OllamaError> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: true,
        };

        let url = format!("{}/api/generate", self.base_url);
        debug!("POST {} (model: {})", url, model);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(OllamaError::ModelNotFound(model.to_string()));
        }
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = Box::pin(response.bytes_stream());
        Ok(decode_chunks(body).boxed())
    }

    fn map_send_error(&self, e: reqwest::Error) -> OllamaError {
        if e.is_connect() {
            OllamaError::ServerNotRunning(self.base_url.clone())
        } else {
            OllamaError::Http(e)
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn api_error(response: reqwest::Response) -> OllamaError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    OllamaError::Api(format!("{}: {}", status, message))
}

/// Accept `host:port` as well as full URLs, the way `OLLAMA_HOST` is
/// usually written.
fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}
