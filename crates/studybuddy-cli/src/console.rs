//! Terminal output: notifications, streamed replies and transcripts.

use std::io::Write;

use studybuddy_core::{Notifier, Role, Severity, Transcript, STREAM_CURSOR};

/// Prints notifications to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        eprintln!("{} {}", icon(severity), message);
    }
}

fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✅",
        Severity::Info => "💡",
        Severity::Warning => "⚠️",
        Severity::Error => "❌",
    }
}

/// Writes streamed partial replies to a terminal.
///
/// Partials carry the whole reply so far; only the part not yet shown is
/// written. When the text stops extending what is on screen (a diagnostic
/// replacing a half-finished reply), it is written on a fresh line.
#[derive(Debug, Default)]
pub(crate) struct StreamPrinter {
    shown: String,
}

impl StreamPrinter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// What to write for `partial`, given what is already on screen.
    pub(crate) fn delta(&mut self, partial: &str) -> String {
        // The final call repeats the shown text without a cursor.
        let text = if partial == self.shown {
            partial
        } else {
            partial.strip_suffix(STREAM_CURSOR).unwrap_or(partial)
        };

        let out = match text.strip_prefix(self.shown.as_str()) {
            Some(rest) => rest.to_string(),
            None => format!("\n{}", text),
        };
        self.shown.clear();
        self.shown.push_str(text);
        out
    }

    pub(crate) fn update(&mut self, partial: &str) {
        let delta = self.delta(partial);
        if delta.is_empty() {
            return;
        }
        let mut stdout = std::io::stdout().lock();
        // Best effort: the reply is recorded either way.
        let _ = stdout.write_all(delta.as_bytes());
        let _ = stdout.flush();
    }
}

/// Label printed before a turn.
pub(crate) fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "🧑 You",
        Role::Assistant => "🎓 Tutor",
    }
}

/// Print every turn of the transcript.
pub(crate) fn print_transcript(transcript: &Transcript) {
    if transcript.is_empty() {
        println!("(no messages yet)");
        return;
    }
    for turn in transcript.all() {
        println!("{}:", role_label(turn.role()));
        println!("{}", turn.content());
        println!();
    }
}

pub(crate) fn prompt(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{}", text);
    let _ = stdout.flush();
}
