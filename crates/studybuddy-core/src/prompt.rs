//! Prompt construction for the two tutoring modes.

use crate::catalog::{Level, Mode, Subject};

/// Everything needed to build one prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptRequest<'a> {
    pub mode: Mode,
    pub level: Level,
    pub subject: Subject,
    pub text: &'a str,
}

impl<'a> PromptRequest<'a> {
    pub fn new(mode: Mode, level: Level, subject: Subject, text: &'a str) -> Self {
        Self {
            mode,
            level,
            subject,
            text,
        }
    }
}

/// Build the prompt sent verbatim to the model.
pub fn build_prompt(request: &PromptRequest<'_>) -> String {
    match request.mode {
        Mode::Explain => build_explain_prompt(request.level, request.subject, request.text),
        Mode::Quiz => build_quiz_prompt(request.level, request.subject, request.text),
    }
}

fn build_explain_prompt(level: Level, subject: Subject, text: &str) -> String {
    format!(
        r#"You are an expert {subject} tutor for {level} students.

Explain this topic clearly: "{text}"

Guidelines:
• Break down complex ideas into simple steps
• Use relevant examples and analogies
• Keep language appropriate for {level} level
• Be concise but thorough"#,
        subject = subject,
        level = level,
        text = text,
    )
}

fn build_quiz_prompt(level: Level, subject: Subject, text: &str) -> String {
    format!(
        r#"Create a {level}-level {subject} quiz.

Topic: {text}

Format:
• One clear question
• Four options (A, B, C, D)
• Mark correct answer with [CORRECT]
• Include brief explanation"#,
        level = level,
        subject = subject,
        text = text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_prompt() {
        let prompt = build_prompt(&PromptRequest::new(
            Mode::Explain,
            Level::HighSchool,
            Subject::Math,
            "quadratic equations",
        ));

        assert!(prompt.contains("High School"));
        assert!(prompt.contains("Math"));
        assert!(prompt.contains("quadratic equations"));
        assert!(prompt.contains("simple steps"));
        assert!(prompt.contains("examples and analogies"));
        assert!(!prompt.contains("[CORRECT]"));
    }

    #[test]
    fn test_quiz_prompt() {
        let prompt = build_prompt(&PromptRequest::new(
            Mode::Quiz,
            Level::Graduate,
            Subject::Physics,
            "quantum mechanics",
        ));

        assert!(prompt.starts_with("Create a Graduate-level Physics quiz."));
        assert!(prompt.contains("[CORRECT]"));
        assert!(prompt.contains("Four options (A, B, C, D)"));
        assert!(prompt.contains("Topic: quantum mechanics"));
        assert!(prompt.contains("explanation"));
    }

    #[test]
    fn test_every_combination_builds() {
        for mode in Mode::ALL {
            for level in Level::ALL {
                for subject in Subject::ALL {
                    let prompt = build_prompt(&PromptRequest::new(mode, level, subject, "cells"));
                    assert!(prompt.contains(level.label()));
                    assert!(prompt.contains(subject.label()));
                    assert!(prompt.contains("cells"));
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let request = PromptRequest::new(Mode::Explain, Level::School, Subject::History, "Rome");
        assert_eq!(build_prompt(&request), build_prompt(&request));
    }
}
