//! Streaming generation into incremental display updates.

use std::sync::Arc;

use futures_util::StreamExt;
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::error::BackendError;
use crate::models::ModelName;

/// Appended to partial text while generation is still running. Display only.
pub const STREAM_CURSOR: &str = "▌";

/// Drives one streaming generation call at a time.
pub struct ResponseStreamer {
    backend: Arc<dyn Backend>,
}

impl ResponseStreamer {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Generate a reply to `prompt` and return its full text.
    ///
    /// `on_partial` receives the accumulated text followed by
    /// [`STREAM_CURSOR`] after every fragment, then the final text once more
    /// without the cursor. Backend failures do not propagate: the returned
    /// text is a diagnostic instead, and it is also passed to `on_partial`.
    pub async fn stream_response<F>(&self, model: &ModelName, prompt: &str, mut on_partial: F) -> String
    where
        F: FnMut(&str),
    {
        let text = match self.collect(model, prompt, &mut on_partial).await {
            Ok(text) => {
                info!("Generated {} bytes with {}", text.len(), model);
                text
            }
            Err(e) => {
                warn!("Generation with {} failed: {}", model, e);
                diagnostic(model, &e)
            }
        };
        on_partial(&text);
        text
    }

    async fn collect<F>(
        &self,
        model: &ModelName,
        prompt: &str,
        on_partial: &mut F,
    ) -> Result<String, BackendError>
    where
        F: FnMut(&str),
    {
        debug!("Starting generation with {}", model);
        let mut fragments = self.backend.generate(model.as_str(), prompt).await?;

        let mut full = String::new();
        let mut display = String::new();
        while let Some(fragment) = fragments.next().await {
            full.push_str(&fragment?);

            display.clear();
            display.push_str(&full);
            display.push_str(STREAM_CURSOR);
            on_partial(&display);
        }
        Ok(full)
    }
}

/// Text shown in place of a reply when generation fails.
pub fn diagnostic(model: &ModelName, error: &BackendError) -> String {
    match error {
        BackendError::ModelNotFound(_) => format!(
            "❌ Model '{}' not available. Install with: `ollama pull {}`",
            model, model
        ),
        other => format!("❌ Error: {}", other),
    }
}
