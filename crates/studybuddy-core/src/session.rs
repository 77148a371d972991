//! One interactive tutoring session.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::Backend;
use crate::catalog::{Level, Mode, Subject};
use crate::config::TutorConfig;
use crate::error::TutorError;
use crate::models::{ModelList, ModelName};
use crate::prompt::{build_prompt, PromptRequest};
use crate::streamer::ResponseStreamer;
use crate::transcript::{Transcript, Turn};

/// Settings and transcript of a single user's conversation.
///
/// Only one generation runs at a time: `submit` borrows the session
/// mutably until the reply has been streamed in full.
pub struct TutorSession {
    streamer: ResponseStreamer,
    transcript: Transcript,
    level: Level,
    subject: Subject,
    mode: Mode,
    model: Option<ModelName>,
}

impl TutorSession {
    pub fn new(backend: Arc<dyn Backend>, config: &TutorConfig) -> Self {
        Self {
            streamer: ResponseStreamer::new(backend),
            transcript: Transcript::new(),
            level: config.default_level,
            subject: config.default_subject,
            mode: config.default_mode,
            model: None,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn set_subject(&mut self, subject: Subject) {
        self.subject = subject;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn model(&self) -> Option<&ModelName> {
        self.model.as_ref()
    }

    pub fn select_model(&mut self, model: ModelName) {
        debug!("Selected model {}", model);
        self.model = Some(model);
    }

    /// Pick `preferred` if it is installed, otherwise the first listed model.
    pub fn choose_model(&mut self, available: &ModelList, preferred: Option<&str>) {
        let preferred = preferred.and_then(|wanted| {
            let found = available.iter().find(|m| m.as_str() == wanted).cloned();
            if found.is_none() {
                warn!("Model '{}' is not installed, using the first available", wanted);
            }
            found
        });

        self.model = preferred.or_else(|| available.first().cloned());
    }

    /// Placeholder for the input box.
    pub fn input_placeholder(&self) -> String {
        format!("Ask about {}...", self.subject)
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Record `text` as a user turn, stream the tutor's reply and record it.
    ///
    /// Backend problems still produce an assistant turn, holding the
    /// diagnostic text.
    pub async fn submit<F>(&mut self, text: &str, on_partial: F) -> Result<Turn, TutorError>
    where
        F: FnMut(&str),
    {
        let model = self.model.clone().ok_or(TutorError::NoModelSelected)?;
        if text.trim().is_empty() {
            return Err(TutorError::EmptyMessage);
        }

        self.transcript.append(Turn::user(text));

        let request = PromptRequest::new(self.mode, self.level, self.subject, text);
        let prompt = build_prompt(&request);
        let reply = self.streamer.stream_response(&model, &prompt, on_partial).await;

        let turn = Turn::assistant(reply);
        self.transcript.append(turn.clone());
        Ok(turn)
    }

    /// Start over with an empty transcript. Settings are kept.
    pub fn reset(&mut self) {
        self.transcript = Transcript::new();
    }
}
