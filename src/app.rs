use crate::models::{Question, Test};
use crate::results::{Results, ScoringPolicy};
use crate::session::{ExamSession, PendingExit, SessionStatus};

/// Which pane takes key input during the exam view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Question,
    Palette,
}

/// Columns in the question palette grid; palette cursor movement is
/// defined in terms of this.
pub const PALETTE_COLUMNS: usize = 10;

/// Everything the terminal front-end needs for one mounted test: the
/// resolved test, the current attempt, and view bookkeeping. A retake
/// swaps in a fresh session; nothing outlives the `App`.
pub struct App {
    pub test: Test,
    pub session: ExamSession,
    pub focus: Focus,
    pub palette_cursor: usize,
    /// The blocking "are you sure" before a user submit.
    pub confirm_submit: bool,
    pub result_scroll: usize,
    pub scoring: ScoringPolicy,
    results: Option<Results>,
    pub should_quit: bool,
}

impl App {
    pub fn new(test: Test) -> Self {
        let session = ExamSession::new(&test);
        Self {
            test,
            session,
            focus: Focus::Question,
            palette_cursor: 0,
            confirm_submit: false,
            result_scroll: 0,
            scoring: ScoringPolicy::default(),
            results: None,
            should_quit: false,
        }
    }

    pub fn current_question(&self) -> &Question {
        &self.test.questions[self.session.current_question_index()]
    }

    /// Results for the submitted session, computed exactly once.
    pub fn results(&self) -> Option<&Results> {
        self.results.as_ref()
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    /// Discard the attempt and go back to the start screen with a fresh
    /// session and ledger.
    pub fn retake(&mut self) {
        self.session = ExamSession::new(&self.test);
        self.focus = Focus::Question;
        self.palette_cursor = 0;
        self.confirm_submit = false;
        self.result_scroll = 0;
        self.results = None;
    }

    /// Drive the countdown; called on every event-loop pass.
    pub fn on_poll(&mut self) {
        self.session.poll_timer();
        self.settle();
    }

    /// Quit was requested. In progress it is intercepted by the guard;
    /// anywhere else it goes through immediately.
    pub fn request_quit(&mut self) {
        if self.session.status() == SessionStatus::InProgress {
            self.confirm_submit = false;
            self.focus = Focus::Question;
            self.session.request_exit(PendingExit::Quit);
        } else {
            self.should_quit = true;
        }
    }

    /// User confirmed the exit prompt: the session force-submits, then
    /// the captured navigation goes through.
    pub fn confirm_exit(&mut self) {
        if let Some(PendingExit::Quit) = self.session.confirm_exit() {
            self.should_quit = true;
        }
        self.settle();
    }

    pub fn cancel_exit(&mut self) {
        self.session.cancel_exit();
    }

    pub fn open_submit_prompt(&mut self) {
        if self.session.status() == SessionStatus::InProgress {
            self.confirm_submit = true;
        }
    }

    pub fn cancel_submit_prompt(&mut self) {
        self.confirm_submit = false;
    }

    pub fn confirm_submit_prompt(&mut self) {
        self.confirm_submit = false;
        self.session.submit();
        self.settle();
    }

    pub fn select_option(&mut self, option: usize) {
        self.session.select_option(option);
    }

    pub fn toggle_mark(&mut self) {
        self.session.toggle_mark();
    }

    pub fn go_next(&mut self) {
        self.session.go_next();
    }

    pub fn go_previous(&mut self) {
        self.session.go_previous();
    }

    /// Move keyboard focus into the palette, cursor on the displayed
    /// question, or back out of it.
    pub fn toggle_palette_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Question => {
                self.palette_cursor = self.session.current_question_index();
                Focus::Palette
            }
            Focus::Palette => Focus::Question,
        };
    }

    pub fn palette_move(&mut self, delta: isize) {
        let len = self.test.questions.len();
        if len == 0 {
            return;
        }
        let cursor = self.palette_cursor as isize + delta;
        self.palette_cursor = cursor.clamp(0, len as isize - 1) as usize;
    }

    /// Jump to the question under the palette cursor and hand focus back.
    pub fn palette_jump(&mut self) {
        self.session.jump_to(self.palette_cursor);
        self.focus = Focus::Question;
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.test.questions.len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// After any operation that might have ended the session, derive the
    /// results report once.
    fn settle(&mut self) {
        if self.session.status() == SessionStatus::Submitted && self.results.is_none() {
            self.results = Some(Results::compute(
                &self.test,
                self.session.answers(),
                &self.scoring,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, Subject};

    fn sample_test() -> Test {
        let questions = (1..=5u32)
            .map(|id| Question {
                id,
                text: format!("Question {id}"),
                options: [
                    "A. 1".to_string(),
                    "B. 2".to_string(),
                    "C. 3".to_string(),
                    "D. 4".to_string(),
                ],
                correct_answer: 0,
                explanation: None,
                subject: Subject::Reasoning,
                topic: "Series".to_string(),
                section: "Reasoning".to_string(),
                difficulty: Difficulty::Medium,
                marks: 1,
                time_limit_secs: None,
            })
            .collect();
        Test {
            id: "t".to_string(),
            title: "T".to_string(),
            questions,
            duration_minutes: 1,
            total_marks: 5,
            passing_marks: 2,
            sections: Vec::new(),
        }
    }

    #[test]
    fn test_quit_during_exam_is_intercepted() {
        let mut app = App::new(sample_test());
        app.start();
        app.request_quit();
        assert!(!app.should_quit);
        assert_eq!(app.session.status(), SessionStatus::ExitConfirmPending);
        app.cancel_exit();
        assert_eq!(app.session.status(), SessionStatus::InProgress);
        app.request_quit();
        app.confirm_exit();
        assert!(app.should_quit);
        assert_eq!(app.session.status(), SessionStatus::Submitted);
        assert!(app.results().is_some());
    }

    #[test]
    fn test_quit_outside_exam_goes_straight_through() {
        let mut app = App::new(sample_test());
        app.request_quit();
        assert!(app.should_quit);
        assert_eq!(app.session.status(), SessionStatus::NotStarted);
    }

    #[test]
    fn test_results_computed_once_per_attempt() {
        let mut app = App::new(sample_test());
        app.start();
        app.select_option(0);
        app.confirm_submit_prompt();
        let first = app.results().cloned().unwrap();
        assert_eq!(first.score, 1.0);
        // A stray settle does not rebuild the report.
        app.on_poll();
        assert_eq!(app.results().unwrap(), &first);
    }

    #[test]
    fn test_retake_resets_everything() {
        let mut app = App::new(sample_test());
        app.start();
        app.select_option(2);
        app.confirm_submit_prompt();
        assert!(app.results().is_some());
        app.retake();
        assert_eq!(app.session.status(), SessionStatus::NotStarted);
        assert!(app.results().is_none());
        assert_eq!(app.result_scroll, 0);
    }

    #[test]
    fn test_palette_cursor_clamps() {
        let mut app = App::new(sample_test());
        app.start();
        app.toggle_palette_focus();
        assert_eq!(app.focus, Focus::Palette);
        app.palette_move(-1);
        assert_eq!(app.palette_cursor, 0);
        app.palette_move(PALETTE_COLUMNS as isize);
        assert_eq!(app.palette_cursor, 4);
        app.palette_jump();
        assert_eq!(app.focus, Focus::Question);
        assert_eq!(app.session.current_question_index(), 4);
    }
}
