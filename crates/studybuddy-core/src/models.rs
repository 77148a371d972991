//! Model discovery and display ordering.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::backend::{Backend, ModelDescriptor};
use crate::notify::{Notifier, Severity};

/// Models promoted to the front of the list when installed, best first.
pub const DEFAULT_PRIORITY_MODELS: [&str; 7] = [
    "gemma3:latest",
    "gemma3",
    "gemma2:2b",
    "gemma2",
    "llama3",
    "mistral",
    "deepseek-coder",
];

/// Identifier of an installed model, e.g. `gemma3:latest`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelName(String);

impl ModelName {
    /// Returns `None` for blank names.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Deduplicated model names in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelList(Vec<ModelName>);

impl ModelList {
    pub fn names(&self) -> &[ModelName] {
        &self.0
    }

    pub fn first(&self) -> Option<&ModelName> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|m| m.as_str() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelName> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ModelList {
    type Item = &'a ModelName;
    type IntoIter = std::slice::Iter<'a, ModelName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Pull names out of raw descriptors, dropping the ones that have none.
pub fn extract_names(descriptors: Vec<ModelDescriptor>) -> Vec<ModelName> {
    descriptors
        .into_iter()
        .filter_map(|descriptor| {
            let name = descriptor.name().and_then(ModelName::new);
            if name.is_none() {
                debug!("Dropping model descriptor without a usable name: {:?}", descriptor);
            }
            name
        })
        .collect()
}

/// Order names with the priority list first, then everything else in
/// discovery order. Each name appears once.
pub fn prioritize<S: AsRef<str>>(names: Vec<ModelName>, priority: &[S]) -> ModelList {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    let mut ordered = Vec::with_capacity(names.len());

    for wanted in priority {
        let wanted = wanted.as_ref();
        if seen.contains(wanted) {
            continue;
        }
        if let Some(found) = names.iter().find(|n| n.as_str() == wanted) {
            seen.insert(wanted.to_string());
            ordered.push(found.clone());
        }
    }

    for name in names {
        if seen.insert(name.as_str().to_string()) {
            ordered.push(name);
        }
    }

    ModelList(ordered)
}

/// Discovers installed models and remembers the answer until refreshed.
pub struct ModelDirectory {
    backend: Arc<dyn Backend>,
    priority: Vec<String>,
    cache: RwLock<Option<ModelList>>,
}

impl ModelDirectory {
    /// Create a directory using the default priority list.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_priority(
            backend,
            DEFAULT_PRIORITY_MODELS.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn with_priority(backend: Arc<dyn Backend>, priority: Vec<String>) -> Self {
        Self {
            backend,
            priority,
            cache: RwLock::new(None),
        }
    }

    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// List installed models in display order.
    ///
    /// Never fails: if the backend cannot be queried, a diagnostic goes to
    /// `notifier` and the list is empty. Failures are not cached.
    pub async fn list_models(&self, notifier: &dyn Notifier) -> ModelList {
        if let Some(cached) = self.cache.read().await.as_ref() {
            debug!("Model list served from cache ({} models)", cached.len());
            return cached.clone();
        }

        let mut cache = self.cache.write().await;
        if let Some(cached) = cache.as_ref() {
            return cached.clone();
        }

        match self.backend.list_models().await {
            Ok(descriptors) => {
                let list = prioritize(extract_names(descriptors), &self.priority);
                info!("Discovered {} models", list.len());
                *cache = Some(list.clone());
                list
            }
            Err(e) => {
                warn!("Model enumeration failed: {}", e);
                notifier.notify(
                    Severity::Error,
                    &format!(
                        "Ollama connection failed: {}. Run `ollama serve` to start the server",
                        e
                    ),
                );
                ModelList::default()
            }
        }
    }

    /// Forget the cached list; the next call queries the backend again.
    pub async fn refresh(&self) {
        debug!("Model list cache invalidated");
        *self.cache.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BackendError;
    use crate::testing::{names, FakeBackend, RecordingNotifier};

    fn plain(names: &[&str]) -> Vec<ModelDescriptor> {
        names
            .iter()
            .map(|n| ModelDescriptor::Plain(n.to_string()))
            .collect()
    }

    fn as_strs(list: &ModelList) -> Vec<&str> {
        list.iter().map(ModelName::as_str).collect()
    }

    #[test]
    fn test_model_name_rejects_blank() {
        assert!(ModelName::new("").is_none());
        assert!(ModelName::new("   ").is_none());
        assert_eq!(ModelName::new("mistral").unwrap().as_str(), "mistral");
    }

    #[test]
    fn test_prioritize_moves_preferred_first() {
        let list = prioritize(
            names(&["llama3", "gemma3:latest", "deepseek-coder", "mistral"]),
            &DEFAULT_PRIORITY_MODELS,
        );
        assert_eq!(
            as_strs(&list),
            vec!["gemma3:latest", "llama3", "mistral", "deepseek-coder"]
        );
    }

    #[test]
    fn test_prioritize_keeps_discovery_order_for_the_rest() {
        let list = prioritize(
            names(&["zephyr", "phi3", "gemma2", "qwen2.5", "codellama"]),
            &DEFAULT_PRIORITY_MODELS,
        );
        assert_eq!(
            as_strs(&list),
            vec!["gemma2", "zephyr", "phi3", "qwen2.5", "codellama"]
        );
    }

    #[test]
    fn test_prioritize_deduplicates() {
        let list = prioritize(
            names(&["phi3", "mistral", "phi3", "mistral", "qwen"]),
            &["mistral", "mistral"],
        );
        assert_eq!(as_strs(&list), vec!["mistral", "phi3", "qwen"]);
    }

    #[test]
    fn test_prioritize_exact_match_only() {
        // `gemma3:4b` is not `gemma3`; it stays in discovery order.
        let list = prioritize(names(&["phi3", "gemma3:4b"]), &DEFAULT_PRIORITY_MODELS);
        assert_eq!(as_strs(&list), vec!["phi3", "gemma3:4b"]);
    }

    #[test]
    fn test_extract_names_drops_malformed() {
        let mut descriptors = plain(&["a", ""]);
        descriptors.push(ModelDescriptor::Unrecognized(serde_json::Value::Null));
        descriptors.push(ModelDescriptor::Record {
            model: "b".to_string(),
        });
        let extracted = extract_names(descriptors);
        assert_eq!(extracted, names(&["a", "b"]));
    }

    #[tokio::test]
    async fn test_list_models_orders_results() {
        let backend = Arc::new(FakeBackend::with_models(plain(&[
            "llama3",
            "gemma3:latest",
            "deepseek-coder",
            "mistral",
        ])));
        let directory = ModelDirectory::new(backend);
        let notifier = RecordingNotifier::default();

        let list = directory.list_models(&notifier).await;

        assert_eq!(list.first().unwrap().as_str(), "gemma3:latest");
        let strs = as_strs(&list);
        let position = |name: &str| strs.iter().position(|n| *n == name).unwrap();
        assert!(position("deepseek-coder") > position("mistral"));
        assert!(position("llama3") < position("deepseek-coder"));
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_list_models_is_memoized_until_refresh() {
        let backend = Arc::new(FakeBackend::with_models(plain(&["mistral"])));
        let directory = ModelDirectory::new(backend.clone());
        let notifier = RecordingNotifier::default();

        let first = directory.list_models(&notifier).await;
        let second = directory.list_models(&notifier).await;
        assert_eq!(first, second);
        assert_eq!(backend.list_calls(), 1);

        directory.refresh().await;
        directory.list_models(&notifier).await;
        assert_eq!(backend.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_list_models_failure_returns_empty_and_notifies_once() {
        let backend = Arc::new(FakeBackend::failing_list(BackendError::Unreachable(
            "connection refused".to_string(),
        )));
        let directory = ModelDirectory::new(backend.clone());
        let notifier = RecordingNotifier::default();

        let list = directory.list_models(&notifier).await;

        assert!(list.is_empty());
        let messages = notifier.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, Severity::Error);
        assert!(messages[0].1.contains("connection failed"));
        assert!(messages[0].1.contains("ollama serve"));

        // Failures are not remembered.
        directory.list_models(&notifier).await;
        assert_eq!(backend.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_custom_priority() {
        let backend = Arc::new(FakeBackend::with_models(plain(&["gemma3", "phi3"])));
        let directory = ModelDirectory::with_priority(backend, vec!["phi3".to_string()]);

        let list = directory.list_models(&RecordingNotifier::default()).await;
        assert_eq!(as_strs(&list), vec!["phi3", "gemma3"]);
    }
}
