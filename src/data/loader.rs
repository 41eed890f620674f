use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::models::{Test, NUM_OPTIONS};

/// Error loading or resolving a test catalog.
#[derive(Debug)]
pub enum LoadError {
    /// Catalog file could not be read.
    Io(io::Error),
    /// Catalog file is not valid JSON for the expected shape.
    Parse(serde_json::Error),
    /// A test record violates a data invariant.
    Invalid { test_id: String, reason: String },
    /// No test in the catalog has the requested id.
    TestNotFound(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read catalog: {}", e),
            LoadError::Parse(e) => write!(f, "failed to parse catalog: {}", e),
            LoadError::Invalid { test_id, reason } => {
                write!(f, "test '{}' is malformed: {}", test_id, reason)
            }
            LoadError::TestNotFound(id) => write!(f, "no test with id '{}'", id),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

/// The test catalog: every test this deployment can serve.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub tests: Vec<Test>,
}

impl Catalog {
    /// Load and validate a catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate a catalog from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        let catalog: Catalog = serde_json::from_str(content)?;
        for test in &catalog.tests {
            validate_test(test)?;
        }
        Ok(catalog)
    }

    /// Resolve a test id to its record; `None` means the first test in
    /// the catalog. Failure here is the "not found" boundary.
    pub fn resolve(&self, test_id: Option<&str>) -> Result<&Test, LoadError> {
        match test_id {
            Some(id) => self
                .tests
                .iter()
                .find(|t| t.id == id)
                .ok_or_else(|| LoadError::TestNotFound(id.to_string())),
            None => self
                .tests
                .first()
                .ok_or_else(|| LoadError::TestNotFound("<first>".to_string())),
        }
    }
}

fn invalid(test: &Test, reason: impl Into<String>) -> LoadError {
    LoadError::Invalid {
        test_id: test.id.clone(),
        reason: reason.into(),
    }
}

fn validate_test(test: &Test) -> Result<(), LoadError> {
    if test.questions.is_empty() {
        return Err(invalid(test, "no questions"));
    }
    if test.duration_minutes == 0 {
        return Err(invalid(test, "duration must be at least one minute"));
    }
    if test.total_marks == 0 {
        return Err(invalid(test, "total_marks must be positive"));
    }

    let mut seen_ids = HashSet::new();
    for question in &test.questions {
        if question.id == 0 {
            return Err(invalid(test, "question ids must be positive"));
        }
        if !seen_ids.insert(question.id) {
            return Err(invalid(
                test,
                format!("duplicate question id {}", question.id),
            ));
        }
        if question.correct_answer >= NUM_OPTIONS {
            return Err(invalid(
                test,
                format!(
                    "question {}: correct_answer {} out of range",
                    question.id, question.correct_answer
                ),
            ));
        }
        let distinct: HashSet<&str> =
            question.options.iter().map(|o| o.as_str()).collect();
        if distinct.len() != NUM_OPTIONS {
            return Err(invalid(
                test,
                format!("question {}: options are not distinct", question.id),
            ));
        }
        if question.marks == 0 {
            return Err(invalid(
                test,
                format!("question {}: marks must be at least 1", question.id),
            ));
        }
    }

    // Advisory only: the declared per-section counts describe the test,
    // they do not drive scoring.
    let declared: usize = test.sections.iter().map(|s| s.question_count).sum();
    if !test.sections.is_empty() && declared != test.questions.len() {
        warn!(
            "test '{}': sections declare {} questions but the test has {}",
            test.id,
            declared,
            test.questions.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_json(id: u32, correct: usize) -> String {
        format!(
            r#"{{
                "id": {id},
                "text": "Question {id}",
                "options": ["A. 1", "B. 2", "C. 3", "D. 4"],
                "correct_answer": {correct},
                "subject": "Arithmetic",
                "topic": "Averages",
                "section": "Arithmetic",
                "difficulty": "Easy"
            }}"#
        )
    }

    fn catalog_json(questions: &[String]) -> String {
        format!(
            r#"{{
                "tests": [{{
                    "id": "si-mock-1",
                    "title": "SI Prelims Mock 1",
                    "questions": [{}],
                    "duration_minutes": 30,
                    "total_marks": 2,
                    "passing_marks": 1
                }}]
            }}"#,
            questions.join(",")
        )
    }

    #[test]
    fn test_valid_catalog_loads_with_defaults() {
        let json = catalog_json(&[question_json(1, 0), question_json(2, 3)]);
        let catalog = Catalog::from_json(&json).unwrap();
        let test = catalog.resolve(Some("si-mock-1")).unwrap();
        assert_eq!(test.questions.len(), 2);
        // Defaulted fields.
        assert_eq!(test.questions[0].marks, 1);
        assert_eq!(test.questions[0].time_limit_secs, None);
        assert!(test.sections.is_empty());
    }

    #[test]
    fn test_resolve_unknown_id_is_not_found() {
        let json = catalog_json(&[question_json(1, 0)]);
        let catalog = Catalog::from_json(&json).unwrap();
        assert!(matches!(
            catalog.resolve(Some("nope")),
            Err(LoadError::TestNotFound(_))
        ));
        // No id means the first test.
        assert!(catalog.resolve(None).is_ok());
    }

    #[test]
    fn test_zero_questions_rejected() {
        let json = catalog_json(&[]);
        assert!(matches!(
            Catalog::from_json(&json),
            Err(LoadError::Invalid { .. })
        ));
    }

    #[test]
    fn test_out_of_range_correct_answer_rejected() {
        let json = catalog_json(&[question_json(1, 4)]);
        assert!(matches!(
            Catalog::from_json(&json),
            Err(LoadError::Invalid { .. })
        ));
    }

    #[test]
    fn test_duplicate_question_ids_rejected() {
        let json = catalog_json(&[question_json(7, 0), question_json(7, 1)]);
        assert!(matches!(
            Catalog::from_json(&json),
            Err(LoadError::Invalid { .. })
        ));
    }

    #[test]
    fn test_duplicate_options_rejected() {
        let json = catalog_json(&[question_json(1, 0)
            .replace("\"B. 2\"", "\"A. 1\"")]);
        assert!(matches!(
            Catalog::from_json(&json),
            Err(LoadError::Invalid { .. })
        ));
    }

    #[test]
    fn test_unknown_difficulty_is_a_parse_error() {
        let json =
            catalog_json(&[question_json(1, 0).replace("\"Easy\"", "\"Brutal\"")]);
        assert!(matches!(
            Catalog::from_json(&json),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_subject_is_a_parse_error() {
        let json = catalog_json(&[
            question_json(1, 0).replace("\"Arithmetic\",", "\"Astrology\",")
        ]);
        assert!(matches!(
            Catalog::from_json(&json),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_section_count_mismatch_is_advisory() {
        let json = catalog_json(&[question_json(1, 0)]).replace(
            "\"passing_marks\": 1",
            r#""passing_marks": 1,
               "sections": [{"name": "Arithmetic", "question_count": 5, "marks": 5}]"#,
        );
        // Warned about, not rejected.
        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.tests[0].sections.len(), 1);
    }
}
