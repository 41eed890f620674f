use serde::{Deserialize, Serialize};

use super::Question;

/// A named collection of questions with timing and scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Test {
    pub id: String,
    pub title: String,
    /// Order defines presentation order and palette order.
    pub questions: Vec<Question>,
    pub duration_minutes: u32,
    pub total_marks: u32,
    pub passing_marks: u32,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Test {
    pub fn duration_secs(&self) -> u32 {
        self.duration_minutes * 60
    }
}

/// Section of a test, with the explicit label set used to match
/// questions into it for the results breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    /// Declared question count. Advisory; the loader warns on mismatch.
    pub question_count: usize,
    pub marks: u32,
    /// A question belongs to this section iff its `section` field equals
    /// one of these (case-insensitive, trimmed). Empty means `[name]`.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl Section {
    /// Whether a question's section label falls in this section.
    pub fn matches(&self, question_section: &str) -> bool {
        let needle = question_section.trim();
        if self.labels.is_empty() {
            return self.name.trim().eq_ignore_ascii_case(needle);
        }
        self.labels
            .iter()
            .any(|label| label.trim().eq_ignore_ascii_case(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str, labels: &[&str]) -> Section {
        Section {
            name: name.to_string(),
            question_count: 0,
            marks: 0,
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_labels_fall_back_to_name() {
        let s = section("Arithmetic", &[]);
        assert!(s.matches("Arithmetic"));
        assert!(s.matches("  arithmetic "));
        assert!(!s.matches("Reasoning"));
    }

    #[test]
    fn test_labels_match_case_insensitively() {
        let s = section("General Studies", &["General Studies", "GS", "Polity"]);
        assert!(s.matches("gs"));
        assert!(s.matches("POLITY"));
        // The name itself no longer matches unless listed.
        let s = section("General Studies", &["GS"]);
        assert!(!s.matches("General Studies"));
    }
}
