//! Study Buddy CLI - a local AI tutor in the terminal.

use clap::{Parser, Subcommand};
use studybuddy_core::TutorConfig;

mod commands;
mod console;

use commands::SessionArgs;

/// Study Buddy - learn with a model running on your own machine
#[derive(Parser)]
#[command(name = "studybuddy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ollama server URL (default: $OLLAMA_HOST or http://localhost:11434)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive tutoring session
    Chat {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Ask a single question and print the reply
    Ask {
        /// Topic or question
        text: String,
        #[command(flatten)]
        session: SessionArgs,
    },

    /// List installed models in preference order
    Models,

    /// Show configuration and available options
    Info,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let mut config = TutorConfig::from_env();
    if let Some(url) = cli.url {
        config.ollama_url = url;
    }

    // One interaction at a time; a single-threaded runtime is all we need.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| miette::miette!("Failed to start async runtime: {}", e))?;

    match cli.command {
        Commands::Chat { session } => runtime.block_on(commands::chat::run(&config, &session)),
        Commands::Ask { text, session } => {
            runtime.block_on(commands::ask::run(&config, &session, &text))
        }
        Commands::Models => runtime.block_on(commands::models::run(&config)),
        Commands::Info => commands::info::run(&config),
    }
}
