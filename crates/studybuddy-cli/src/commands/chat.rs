//! Chat command - interactive tutoring session.

use studybuddy_core::{Level, Mode, Notifier, Role, Severity, Subject, TutorConfig};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{SessionArgs, Tutor};
use crate::console::{print_transcript, prompt, role_label, StreamPrinter};

pub(crate) const APP_TITLE: &str = "🎓 AI Study Buddy - Learn Locally";

/// A `/command` typed at the chat prompt.
#[derive(Debug, PartialEq)]
enum ChatCommand {
    Mode(Mode),
    Level(Level),
    Subject(Subject),
    Model(String),
    Models,
    History,
    Reset,
    Settings,
    Help,
    Quit,
}

fn parse_command(input: &str) -> miette::Result<ChatCommand> {
    let (name, arg) = match input.trim().split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (input.trim(), ""),
    };

    let command = match name.to_lowercase().as_str() {
        "mode" => ChatCommand::Mode(arg.parse().map_err(|e| miette::miette!("{}", e))?),
        "level" => ChatCommand::Level(arg.parse().map_err(|e| miette::miette!("{}", e))?),
        "subject" => ChatCommand::Subject(arg.parse().map_err(|e| miette::miette!("{}", e))?),
        "model" if arg.is_empty() => return Err(miette::miette!("Usage: /model NAME")),
        "model" => ChatCommand::Model(arg.to_string()),
        "models" => ChatCommand::Models,
        "history" => ChatCommand::History,
        "reset" | "clear" => ChatCommand::Reset,
        "settings" => ChatCommand::Settings,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        other => return Err(miette::miette!("Unknown command '/{}'. Type /help", other)),
    };
    Ok(command)
}

pub(crate) async fn run(config: &TutorConfig, args: &SessionArgs) -> miette::Result<()> {
    println!("{}", APP_TITLE);
    println!();

    let mut tutor = Tutor::start(config, args).await;
    print_settings(&tutor);
    println!("🔒 All data stays on your device");
    println!("Type /help for commands.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt(&format!("{} > ", tutor.session.input_placeholder()));

        let line = lines
            .next_line()
            .await
            .map_err(|e| miette::miette!("Failed to read input: {}", e))?;
        let Some(line) = line else {
            println!();
            break;
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            match parse_command(command) {
                Ok(ChatCommand::Quit) => break,
                Ok(command) => execute(&mut tutor, command).await,
                Err(e) => tutor.notifier.notify(Severity::Error, &e.to_string()),
            }
            continue;
        }

        ask(&mut tutor, line).await;
    }

    Ok(())
}

async fn ask(tutor: &mut Tutor, text: &str) {
    if tutor.session.model().is_none() {
        tutor
            .notifier
            .notify(Severity::Error, "Install an Ollama model first!");
        return;
    }

    println!();
    println!("{}:", role_label(Role::Assistant));

    let mut printer = StreamPrinter::new();
    let result = tutor
        .session
        .submit(text, |partial| printer.update(partial))
        .await;

    match result {
        Ok(_) => {
            println!();
            println!();
        }
        Err(e) => tutor.notifier.notify(Severity::Error, &e.to_string()),
    }
}

async fn execute(tutor: &mut Tutor, command: ChatCommand) {
    match command {
        ChatCommand::Mode(mode) => {
            tutor.session.set_mode(mode);
            println!("Mode: {}", mode);
        }
        ChatCommand::Level(level) => {
            tutor.session.set_level(level);
            println!("Education level: {}", level);
        }
        ChatCommand::Subject(subject) => {
            tutor.session.set_subject(subject);
            println!("Subject: {}", subject);
        }
        ChatCommand::Model(name) => {
            if tutor.models.contains(&name) {
                tutor.select_model(Some(&name));
                println!("Model: {}", name);
            } else {
                tutor.notifier.notify(
                    Severity::Warning,
                    &format!(
                        "Model '{}' is not installed. Install with: `ollama pull {}`",
                        name, name
                    ),
                );
            }
        }
        ChatCommand::Models => {
            tutor.refresh_models().await;
            print_models(tutor);
        }
        ChatCommand::History => print_transcript(tutor.session.transcript()),
        ChatCommand::Reset => {
            tutor.session.reset();
            println!("Conversation cleared.");
        }
        ChatCommand::Settings => print_settings(tutor),
        ChatCommand::Help => print_help(),
        ChatCommand::Quit => {}
    }
}

fn print_settings(tutor: &Tutor) {
    let model = tutor
        .session
        .model()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    println!("Education level: {}", tutor.session.level());
    println!("Subject:         {}", tutor.session.subject());
    println!("Mode:            {}", tutor.session.mode());
    println!("Model:           {}", model);
}

fn print_models(tutor: &Tutor) {
    if tutor.models.is_empty() {
        return;
    }
    println!("Installed models:");
    for model in &tutor.models {
        let marker = if tutor.session.model() == Some(model) { "*" } else { " " };
        println!("  {} {}", marker, model);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /mode explain|quiz     Switch between explanations and quizzes");
    println!("  /level LEVEL           School, High School, Graduate, PG/PhD");
    println!("  /subject SUBJECT       Math, History, Computer Science, Physics, Biology, Chemistry");
    println!("  /model NAME            Use another installed model");
    println!("  /models                Refresh and list installed models");
    println!("  /history               Show the conversation so far");
    println!("  /reset                 Start a new conversation");
    println!("  /settings              Show current settings");
    println!("  /quit                  Leave");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings_commands() {
        assert_eq!(parse_command("mode quiz").unwrap(), ChatCommand::Mode(Mode::Quiz));
        assert_eq!(
            parse_command("level PG/PhD").unwrap(),
            ChatCommand::Level(Level::Postgraduate)
        );
        assert_eq!(
            parse_command("subject computer science").unwrap(),
            ChatCommand::Subject(Subject::ComputerScience)
        );
        assert_eq!(
            parse_command("model gemma3:latest").unwrap(),
            ChatCommand::Model("gemma3:latest".to_string())
        );
    }

    #[test]
    fn test_parse_plain_commands() {
        assert_eq!(parse_command("models").unwrap(), ChatCommand::Models);
        assert_eq!(parse_command("HISTORY").unwrap(), ChatCommand::History);
        assert_eq!(parse_command("clear").unwrap(), ChatCommand::Reset);
        assert_eq!(parse_command(" quit ").unwrap(), ChatCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("mode lecture").is_err());
        assert!(parse_command("model").is_err());
        assert!(parse_command("dance").is_err());
    }
}
