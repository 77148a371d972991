//! Tutor configuration.

use std::str::FromStr;

use studybuddy_ollama::{OllamaClient, DEFAULT_OLLAMA_URL};
use tracing::warn;

use crate::catalog::{Level, Mode, Subject};
use crate::models::DEFAULT_PRIORITY_MODELS;

/// Configuration for a tutoring session.
#[derive(Debug, Clone)]
pub struct TutorConfig {
    /// Ollama server URL (default: http://localhost:11434)
    pub ollama_url: String,
    /// Models promoted to the front of the model list, best first
    pub priority_models: Vec<String>,
    pub default_level: Level,
    pub default_subject: Subject,
    pub default_mode: Mode,
    /// Model to select instead of the first listed one
    pub default_model: Option<String>,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            priority_models: DEFAULT_PRIORITY_MODELS.iter().map(|s| s.to_string()).collect(),
            default_level: Level::default(),
            default_subject: Subject::default(),
            default_mode: Mode::default(),
            default_model: None,
        }
    }
}

impl TutorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key/value source; unset or unparsable values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let ollama_url = var("OLLAMA_HOST").unwrap_or(defaults.ollama_url);

        let priority_models = var("STUDYBUDDY_PRIORITY_MODELS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.priority_models);

        Self {
            ollama_url,
            priority_models,
            default_level: parse_or("STUDYBUDDY_LEVEL", var("STUDYBUDDY_LEVEL"), defaults.default_level),
            default_subject: parse_or(
                "STUDYBUDDY_SUBJECT",
                var("STUDYBUDDY_SUBJECT"),
                defaults.default_subject,
            ),
            default_mode: parse_or("STUDYBUDDY_MODE", var("STUDYBUDDY_MODE"), defaults.default_mode),
            default_model: var("STUDYBUDDY_MODEL").map(|v| v.trim().to_string()),
        }
    }

    /// Client for the configured Ollama server.
    pub fn ollama_client(&self) -> OllamaClient {
        OllamaClient::with_url(self.ollama_url.as_str())
    }

    /// Create a builder for configuration.
    pub fn builder() -> TutorConfigBuilder {
        TutorConfigBuilder::default()
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Ignoring {}: {}", key, e);
            default
        }),
        None => default,
    }
}

/// Builder for tutor configuration.
#[derive(Debug, Default)]
pub struct TutorConfigBuilder {
    config: TutorConfig,
}

impl TutorConfigBuilder {
    pub fn ollama_url(mut self, url: impl Into<String>) -> Self {
        self.config.ollama_url = url.into();
        self
    }

    pub fn priority_models(mut self, models: Vec<String>) -> Self {
        self.config.priority_models = models;
        self
    }

    pub fn default_level(mut self, level: Level) -> Self {
        self.config.default_level = level;
        self
    }

    pub fn default_subject(mut self, subject: Subject) -> Self {
        self.config.default_subject = subject;
        self
    }

    pub fn default_mode(mut self, mode: Mode) -> Self {
        self.config.default_mode = mode;
        self
    }

    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = Some(model.into());
        self
    }

    pub fn build(self) -> TutorConfig {
        self.config
    }
}
