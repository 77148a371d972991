//! CLI commands.

pub mod ask;
pub mod chat;
pub mod info;
pub mod models;

use std::sync::Arc;

use clap::Args;
use studybuddy_core::{
    model_hint, Backend, Level, Mode, ModelDirectory, ModelList, Notifier, Severity, Subject,
    TutorConfig, TutorSession, INSTALL_HINT,
};

use crate::console::ConsoleNotifier;

/// Settings shared by the commands that talk to a model.
#[derive(Args, Debug, Default)]
pub struct SessionArgs {
    /// Education level (School, High School, Graduate, PG/PhD)
    #[arg(short, long)]
    pub level: Option<Level>,

    /// Subject (Math, History, Computer Science, Physics, Biology, Chemistry)
    #[arg(short, long)]
    pub subject: Option<Subject>,

    /// Mode: explain or quiz
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Model to use (default: best installed model)
    #[arg(long)]
    pub model: Option<String>,
}

/// Everything a talking command needs.
pub(crate) struct Tutor {
    pub directory: ModelDirectory,
    pub session: TutorSession,
    pub models: ModelList,
    pub notifier: ConsoleNotifier,
}

impl Tutor {
    /// Connect to the backend, discover models and open a session.
    pub(crate) async fn start(config: &TutorConfig, args: &SessionArgs) -> Tutor {
        let backend: Arc<dyn Backend> = Arc::new(config.ollama_client());
        let directory = ModelDirectory::with_priority(backend.clone(), config.priority_models.clone());
        let notifier = ConsoleNotifier;

        let mut session = TutorSession::new(backend, config);
        if let Some(level) = args.level {
            session.set_level(level);
        }
        if let Some(subject) = args.subject {
            session.set_subject(subject);
        }
        if let Some(mode) = args.mode {
            session.set_mode(mode);
        }

        let models = directory.list_models(&notifier).await;
        let mut tutor = Tutor {
            directory,
            session,
            models,
            notifier,
        };
        tutor.select_model(args.model.as_deref().or(config.default_model.as_deref()));
        tutor
    }

    /// Choose a model from the current list and show feedback about it.
    pub(crate) fn select_model(&mut self, preferred: Option<&str>) {
        self.session.choose_model(&self.models, preferred);

        if let Some(wanted) = preferred {
            if !self.models.is_empty() && !self.models.contains(wanted) {
                self.notifier.notify(
                    Severity::Warning,
                    &format!("Model '{}' is not installed", wanted),
                );
            }
        }

        match self.session.model() {
            Some(model) => {
                if let Some((severity, message)) = model_hint(model, &self.models) {
                    self.notifier.notify(severity, &message);
                }
            }
            None => {
                self.notifier.notify(Severity::Error, "No models found");
                self.notifier
                    .notify(Severity::Info, &format!("Install one with: `{}`", INSTALL_HINT));
            }
        }
    }

    /// Query the backend again and re-select the current model if possible.
    pub(crate) async fn refresh_models(&mut self) {
        self.directory.refresh().await;
        self.models = self.directory.list_models(&self.notifier).await;

        let current = self.session.model().map(|m| m.as_str().to_string());
        self.select_model(current.as_deref());
    }
}
