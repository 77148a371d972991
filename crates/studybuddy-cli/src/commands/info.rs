//! Info command - show configuration and the available options.

use studybuddy_core::{Level, Mode, Subject, TutorConfig};

use super::chat::APP_TITLE;

pub(crate) fn run(config: &TutorConfig) -> miette::Result<()> {
    println!("{}", APP_TITLE);
    println!("================================");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Backend:");
    println!("  Ollama server:  {}", config.ollama_client().base_url());
    println!("  Start it with:  ollama serve");
    println!();

    println!("Defaults:");
    println!("  Education level: {}", config.default_level);
    println!("  Subject:         {}", config.default_subject);
    println!("  Mode:            {}", config.default_mode);
    println!(
        "  Model:           {}",
        config.default_model.as_deref().unwrap_or("(best installed)")
    );
    println!();

    println!("Education levels:");
    for level in Level::ALL {
        println!("  - {}", level);
    }
    println!();

    println!("Subjects:");
    for subject in Subject::ALL {
        println!("  - {}", subject);
    }
    println!();

    println!("Modes:");
    for mode in Mode::ALL {
        println!("  - {}", mode);
    }
    println!();

    println!("Preferred models (in order):");
    for model in &config.priority_models {
        println!("  - {}", model);
    }
    println!();

    println!("Environment:");
    println!("  OLLAMA_HOST, STUDYBUDDY_PRIORITY_MODELS, STUDYBUDDY_LEVEL,");
    println!("  STUDYBUDDY_SUBJECT, STUDYBUDDY_MODE, STUDYBUDDY_MODEL");
    println!();

    println!("🔒 All data stays on your device");

    Ok(())
}
