//! Models command - list installed models in preference order.

use studybuddy_core::TutorConfig;

use super::{SessionArgs, Tutor};

pub(crate) async fn run(config: &TutorConfig) -> miette::Result<()> {
    // Reports "no models" and the install remedy itself.
    let tutor = Tutor::start(config, &SessionArgs::default()).await;
    if tutor.models.is_empty() {
        return Ok(());
    }

    println!("Installed models:");
    for model in &tutor.models {
        let marker = if config.priority_models.iter().any(|p| p == model.as_str()) {
            "★"
        } else {
            " "
        };
        let selected = if tutor.session.model() == Some(model) {
            "  (default)"
        } else {
            ""
        };
        println!("  {} {}{}", marker, model, selected);
    }

    println!();
    println!("Server: {}", config.ollama_client().base_url());

    Ok(())
}
