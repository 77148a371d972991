//! # Study Buddy core
//!
//! The logic behind a local, privacy-preserving tutor: it discovers which
//! models the local Ollama runtime has installed, builds a prompt for the
//! chosen level, subject and mode, and streams the reply into a transcript.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────────┐   ┌──────────────────┐
//! │ TutorSession │-->│ Prompt Builder │-->│ ResponseStreamer │--> Backend
//! └──────┬───────┘   └────────────────┘   └────────┬─────────┘    (Ollama)
//!        │                                         │
//!  ┌─────┴──────┐                           partial text
//!  │ Transcript │                                  │
//!  └────────────┘                           presentation layer
//! ```
//!
//! The model list comes from [`ModelDirectory`], which remembers it until
//! refreshed. Backend failures never escape as errors: enumeration failures
//! become a [`Notifier`] message and generation failures become diagnostic
//! reply text.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use studybuddy_core::{ModelDirectory, TracingNotifier, TutorConfig, TutorSession};
//!
//! let config = TutorConfig::from_env();
//! let backend = Arc::new(config.ollama_client());
//! let directory = ModelDirectory::with_priority(backend.clone(), config.priority_models.clone());
//!
//! let models = directory.list_models(&TracingNotifier).await;
//! let mut session = TutorSession::new(backend, &config);
//! session.choose_model(&models, None);
//!
//! let reply = session.submit("quadratic equations", |partial| print!("{partial}")).await?;
//! ```

mod backend;
mod catalog;
mod config;
mod error;
mod hint;
mod models;
mod notify;
mod prompt;
mod session;
mod streamer;
mod transcript;

#[cfg(test)]
mod testing;

pub use backend::{Backend, FragmentStream, ModelDescriptor};
pub use catalog::{Level, Mode, Subject};
pub use config::{TutorConfig, TutorConfigBuilder};
pub use error::{BackendError, TutorError};
pub use hint::{model_hint, INSTALL_HINT};
pub use models::{
    extract_names, prioritize, ModelDirectory, ModelList, ModelName, DEFAULT_PRIORITY_MODELS,
};
pub use notify::{Notifier, Severity, TracingNotifier};
pub use prompt::{build_prompt, PromptRequest};
pub use session::TutorSession;
pub use streamer::{diagnostic, ResponseStreamer, STREAM_CURSOR};
pub use transcript::{Role, Transcript, Turn};

// Re-export the backend client for convenience
pub use studybuddy_ollama::{OllamaClient, OllamaError, DEFAULT_OLLAMA_URL};
