//! Feedback on the selected model.

use crate::models::{ModelList, ModelName};
use crate::notify::Severity;

/// Remedy shown when no model is installed at all.
pub const INSTALL_HINT: &str = "ollama pull gemma3";

/// Suggest something about `selected`, given everything that is installed.
pub fn model_hint(selected: &ModelName, available: &ModelList) -> Option<(Severity, String)> {
    let selected = selected.as_str().to_lowercase();

    if selected.contains("gemma3") {
        Some((Severity::Success, "Gemma3 - Optimal for education".to_string()))
    } else if selected.contains("deepseek-coder") {
        Some((Severity::Success, "DeepSeek - Great for coding".to_string()))
    } else if !available
        .iter()
        .any(|m| m.as_str().to_lowercase().contains("gemma3"))
    {
        Some((Severity::Info, format!("Try: `{}`", INSTALL_HINT)))
    } else {
        None
    }
}
