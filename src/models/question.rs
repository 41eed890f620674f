use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of options every question carries.
pub const NUM_OPTIONS: usize = 4;

/// Subject a question belongs to. Closed set: records with an
/// unrecognized subject are rejected at catalog load, not cast through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Arithmetic,
    Reasoning,
    GeneralStudies,
    CurrentAffairs,
    English,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Subject::Arithmetic => "Arithmetic",
            Subject::Reasoning => "Reasoning",
            Subject::GeneralStudies => "General Studies",
            Subject::CurrentAffairs => "Current Affairs",
            Subject::English => "English",
        };
        f.write_str(name)
    }
}

/// Difficulty rating. Informational; scoring never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

fn default_marks() -> u32 {
    1
}

/// One multiple-choice question with exactly one correct option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique within a test; the answer ledger is keyed on it.
    pub id: u32,
    pub text: String,
    pub options: [String; NUM_OPTIONS],
    /// Index into `options`, 0-based.
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: Option<String>,
    pub subject: Subject,
    pub topic: String,
    /// Free-text section label, matched against `Section::labels`.
    pub section: String,
    pub difficulty: Difficulty,
    #[serde(default = "default_marks")]
    pub marks: u32,
    /// Suggested seconds for this question. Never enforced.
    #[serde(default)]
    pub time_limit_secs: Option<u32>,
}
