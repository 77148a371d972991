//! The inference backend seam.

use async_trait::async_trait;
use futures_util::future;
use futures_util::stream::{BoxStream, StreamExt};
use serde_json::{Map, Value};
use studybuddy_ollama::{ModelEntry, OllamaClient};

use crate::error::BackendError;

/// Lazy, finite, non-restartable sequence of generated text fragments.
pub type FragmentStream = BoxStream<'static, Result<String, BackendError>>;

/// One raw entry of the backend's model listing.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelDescriptor {
    /// A typed record exposing a `model` field.
    Record { model: String },
    /// A key/value mapping; the name is under `name`, `model` or `id`.
    Keyed(Map<String, Value>),
    /// A bare name.
    Plain(String),
    /// Anything else.
    Unrecognized(Value),
}

impl ModelDescriptor {
    /// Keys consulted for mapping-shaped descriptors, in priority order.
    pub const NAME_KEYS: [&'static str; 3] = ["name", "model", "id"];

    /// Extract the model name, if this descriptor carries one.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            ModelDescriptor::Record { model } => Some(model.as_str()),
            ModelDescriptor::Keyed(map) => Self::NAME_KEYS.iter().find_map(|key| {
                map.get(*key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
            }),
            ModelDescriptor::Plain(name) => Some(name.as_str()),
            ModelDescriptor::Unrecognized(_) => None,
        };
        name.filter(|s| !s.trim().is_empty())
    }
}

impl From<ModelEntry> for ModelDescriptor {
    fn from(entry: ModelEntry) -> Self {
        match entry {
            ModelEntry::Local(local) => ModelDescriptor::Record { model: local.model },
            ModelEntry::Keyed(map) => ModelDescriptor::Keyed(map),
            ModelEntry::Name(name) => ModelDescriptor::Plain(name),
            ModelEntry::Unknown(value) => ModelDescriptor::Unrecognized(value),
        }
    }
}

/// A local inference runtime that can list models and generate text.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Enumerate the installed models.
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, BackendError>;

    /// Start generating text for `prompt` with `model`.
    async fn generate(&self, model: &str, prompt: &str) -> Result<FragmentStream, BackendError>;
}

#[async_trait]
impl Backend for OllamaClient {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, BackendError> {
        let entries = OllamaClient::list_models(self).await?;
        Ok(entries.into_iter().map(ModelDescriptor::from).collect())
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<FragmentStream, BackendError> {
        let chunks = self.generate_stream(model, prompt).await?;
        let fragments = chunks
            .map(|chunk| chunk.map(|c| c.response).map_err(BackendError::from))
            .filter(|fragment| future::ready(!matches!(fragment, Ok(text) if text.is_empty())));
        Ok(fragments.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyed(value: Value) -> ModelDescriptor {
        match value {
            Value::Object(map) => ModelDescriptor::Keyed(map),
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_every_shape_yields_the_same_name() {
        let shapes = vec![
            ModelDescriptor::Record {
                model: "gemma3:latest".to_string(),
            },
            keyed(json!({"name": "gemma3:latest"})),
            keyed(json!({"model": "gemma3:latest"})),
            keyed(json!({"id": "gemma3:latest"})),
            ModelDescriptor::Plain("gemma3:latest".to_string()),
        ];

        for shape in &shapes {
            assert_eq!(shape.name(), Some("gemma3:latest"), "shape: {:?}", shape);
        }
    }

    #[test]
    fn test_keyed_priority_order() {
        let d = keyed(json!({"id": "c", "model": "b", "name": "a"}));
        assert_eq!(d.name(), Some("a"));

        let d = keyed(json!({"id": "c", "model": "b"}));
        assert_eq!(d.name(), Some("b"));

        // An empty name falls through to the next key.
        let d = keyed(json!({"name": "", "id": "c"}));
        assert_eq!(d.name(), Some("c"));
    }

    #[test]
    fn test_unusable_descriptors() {
        assert_eq!(keyed(json!({"size": 12})).name(), None);
        assert_eq!(keyed(json!({"name": 7})).name(), None);
        assert_eq!(ModelDescriptor::Plain(String::new()).name(), None);
        assert_eq!(
            ModelDescriptor::Record {
                model: " ".to_string()
            }
            .name(),
            None
        );
        assert_eq!(ModelDescriptor::Unrecognized(json!(42)).name(), None);
    }

    #[test]
    fn test_from_model_entry() {
        let entry: ModelEntry =
            serde_json::from_value(json!({"model": "llama3", "digest": "abc"})).unwrap();
        assert_eq!(
            ModelDescriptor::from(entry),
            ModelDescriptor::Record {
                model: "llama3".to_string()
            }
        );

        let entry: ModelEntry = serde_json::from_value(json!("mistral")).unwrap();
        assert_eq!(
            ModelDescriptor::from(entry),
            ModelDescriptor::Plain("mistral".to_string())
        );
    }

    #[tokio::test]
    async fn test_ollama_drops_empty_fragments() {
        let url = crate::testing::serve_ndjson(&[
            r#"{"response":"Hel","done":false}"#,
            r#"{"response":"lo","done":false}"#,
            r#"{"response":"","done":true}"#,
        ])
        .await;

        let client = OllamaClient::with_url(url);
        let fragments: Vec<String> = Backend::generate(&client, "llama3", "hi")
            .await
            .unwrap()
            .map(|fragment| fragment.unwrap())
            .collect()
            .await;

        assert_eq!(fragments, vec!["Hel", "lo"]);
    }
}
