//! Results calculation for a submitted session.
//!
//! `Results::compute` is a pure function of the test and the frozen
//! answer ledger; recomputing for a re-render is always safe.

use std::collections::HashMap;

use crate::models::Test;
use crate::session::Answer;

/// Pluggable scoring knobs. The default is plain marking: full marks for
/// a correct answer, nothing for anything else.
#[derive(Debug, Clone, Copy)]
pub struct ScoringPolicy {
    /// Fraction of a question's marks deducted for an incorrect answered
    /// question. 0.25 models the common "quarter negative" scheme.
    pub negative_mark_per_wrong: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            negative_mark_per_wrong: 0.0,
        }
    }
}

/// Per-section slice of the breakdown. Only questions matching one of
/// the test's configured sections appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionOutcome {
    pub name: String,
    /// Questions that matched this section.
    pub total: usize,
    pub attempted: usize,
    pub correct: usize,
}

/// The report derived once from a submitted session.
#[derive(Debug, Clone, PartialEq)]
pub struct Results {
    pub attempted: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub unanswered: usize,
    pub score: f64,
    pub total_marks: u32,
    pub percentage: f64,
    pub passed: bool,
    pub sections: Vec<SectionOutcome>,
}

impl Results {
    /// Score the ledger against the test. Deterministic and side-effect
    /// free; an out-of-range selection counts as attempted but wrong.
    pub fn compute(test: &Test, answers: &[Answer], policy: &ScoringPolicy) -> Self {
        let by_id: HashMap<u32, &Answer> =
            answers.iter().map(|a| (a.question_id, a)).collect();

        let mut attempted = 0;
        let mut correct_count = 0;
        let mut score = 0.0;

        let mut sections: Vec<SectionOutcome> = test
            .sections
            .iter()
            .map(|s| SectionOutcome {
                name: s.name.clone(),
                total: 0,
                attempted: 0,
                correct: 0,
            })
            .collect();

        for question in &test.questions {
            let selected = by_id
                .get(&question.id)
                .and_then(|a| a.selected_option);
            let is_attempted = selected.is_some();
            let is_correct = selected == Some(question.correct_answer);

            if is_attempted {
                attempted += 1;
            }
            if is_correct {
                correct_count += 1;
                score += f64::from(question.marks);
            } else if is_attempted {
                score -= policy.negative_mark_per_wrong * f64::from(question.marks);
            }

            // First matching section wins; unmatched questions are simply
            // left out of the breakdown.
            let slot = test
                .sections
                .iter()
                .position(|s| s.matches(&question.section));
            if let Some(i) = slot {
                sections[i].total += 1;
                if is_attempted {
                    sections[i].attempted += 1;
                }
                if is_correct {
                    sections[i].correct += 1;
                }
            }
        }

        let incorrect_count = attempted - correct_count;
        let unanswered = test.questions.len() - attempted;
        let total_marks = test.total_marks;
        let percentage = if total_marks > 0 {
            score / f64::from(total_marks) * 100.0
        } else {
            0.0
        };
        let pass_mark = if total_marks > 0 {
            f64::from(test.passing_marks) / f64::from(total_marks) * 100.0
        } else {
            0.0
        };

        Self {
            attempted,
            correct_count,
            incorrect_count,
            unanswered,
            score,
            total_marks,
            percentage,
            passed: percentage >= pass_mark,
            sections,
        }
    }
}
