//! Wire types for the Ollama HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response from the tags API (list models).
#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub(crate) models: Vec<ModelEntry>,
}

/// One entry of the tags listing.
///
/// Servers and proxies do not agree on the shape of this entry, so each one
/// is matched against the known shapes in order: a documented model record,
/// any other object, a bare name, and finally anything else.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ModelEntry {
    /// A model record as documented for `/api/tags`.
    Local(LocalModel),
    /// Some other JSON object; the name lives under one of its keys.
    Keyed(Map<String, Value>),
    /// Just the model name.
    Name(String),
    /// Nothing we know how to read a name from.
    Unknown(Value),
}

/// An installed model as reported by `/api/tags`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocalModel {
    /// Model tag, e.g. `gemma3:latest`.
    pub model: String,
    /// Content digest of the model blob.
    pub digest: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

/// Request to the generate API.
#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest<'a> {
    pub(crate) model: &'a str,
    pub(crate) prompt: &'a str,
    pub(crate) stream: bool,
}

/// One line of a streaming generate response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateChunk {
    /// Text produced since the previous chunk.
    #[serde(default)]
    pub response: String,
    /// Set on the final chunk.
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: String,
}
