//! Education levels, subjects and tutoring modes.

use std::fmt;
use std::str::FromStr;

use crate::error::TutorError;

/// Education level the explanation or quiz is pitched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    School,
    #[default]
    HighSchool,
    Graduate,
    Postgraduate,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::School,
        Level::HighSchool,
        Level::Graduate,
        Level::Postgraduate,
    ];

    /// Label shown to the user and used inside prompts.
    pub fn label(self) -> &'static str {
        match self {
            Level::School => "School",
            Level::HighSchool => "High School",
            Level::Graduate => "Graduate",
            Level::Postgraduate => "PG/PhD",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "school" => Ok(Level::School),
            "high school" | "highschool" => Ok(Level::HighSchool),
            "graduate" | "grad" => Ok(Level::Graduate),
            "pg/phd" | "pg" | "phd" | "postgraduate" => Ok(Level::Postgraduate),
            _ => Err(TutorError::InvalidLevel(s.to_string())),
        }
    }
}

/// Subject area of the tutoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Subject {
    Math,
    History,
    #[default]
    ComputerScience,
    Physics,
    Biology,
    Chemistry,
}

impl Subject {
    pub const ALL: [Subject; 6] = [
        Subject::Math,
        Subject::History,
        Subject::ComputerScience,
        Subject::Physics,
        Subject::Biology,
        Subject::Chemistry,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::History => "History",
            Subject::ComputerScience => "Computer Science",
            Subject::Physics => "Physics",
            Subject::Biology => "Biology",
            Subject::Chemistry => "Chemistry",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Subject {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "math" | "maths" => Ok(Subject::Math),
            "history" => Ok(Subject::History),
            "computer science" | "cs" => Ok(Subject::ComputerScience),
            "physics" => Ok(Subject::Physics),
            "biology" | "bio" => Ok(Subject::Biology),
            "chemistry" | "chem" => Ok(Subject::Chemistry),
            _ => Err(TutorError::InvalidSubject(s.to_string())),
        }
    }
}

/// What the tutor should do with the user's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Explain the topic the user asked about.
    #[default]
    Explain,
    /// Write a single multiple-choice question on the topic.
    Quiz,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Explain, Mode::Quiz];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Explain => "Explain a Topic",
            Mode::Quiz => "Generate a Quiz",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = TutorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "explain" | "explain a topic" => Ok(Mode::Explain),
            "quiz" | "generate a quiz" => Ok(Mode::Quiz),
            _ => Err(TutorError::InvalidMode(s.to_string())),
        }
    }
}

/// Lowercase, trim, and treat `-`/`_` as spaces so `high-school` works on
/// the command line.
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect()
}
