//! Exam session state machine.
//!
//! One `ExamSession` is one attempt at a test, from the start screen to
//! submission. It owns the answer ledger and the countdown ticker for its
//! whole lifetime; a retake builds a fresh session, never reuses this one.

use log::{debug, info};
use uuid::Uuid;

use crate::models::{Test, NUM_OPTIONS};
use crate::timer::Ticker;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Start screen; ledger not yet created.
    NotStarted,
    /// Clock running, ledger mutable.
    InProgress,
    /// An exit attempt was intercepted and awaits confirmation. The
    /// clock is held; cancelling must leave the session bit-identical.
    ExitConfirmPending,
    /// Terminal. The ledger is frozen and every mutation is a no-op.
    Submitted,
}

/// The navigation action captured when an exit attempt is intercepted.
/// Returned to the caller on confirmation so it can finally be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingExit {
    /// Quit the application.
    Quit,
}

/// Per-question entry in the answer ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question_id: u32,
    /// None until the user picks an option.
    pub selected_option: Option<usize>,
    pub is_marked: bool,
    /// Seconds this question has been the displayed one.
    pub time_spent_secs: u32,
}

impl Answer {
    fn new(question_id: u32) -> Self {
        Self {
            question_id,
            selected_option: None,
            is_marked: false,
            time_spent_secs: 0,
        }
    }
}

/// One attempt at a test.
pub struct ExamSession {
    attempt_id: Uuid,
    status: SessionStatus,
    current_question_index: usize,
    time_left_secs: u32,
    /// One entry per question, in presentation order.
    answers: Vec<Answer>,
    question_ids: Vec<u32>,
    duration_secs: u32,
    ticker: Option<Ticker>,
    pending_exit: Option<PendingExit>,
}

impl ExamSession {
    /// Create a fresh, not-yet-started session for a test.
    pub fn new(test: &Test) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            status: SessionStatus::NotStarted,
            current_question_index: 0,
            time_left_secs: test.duration_secs(),
            answers: Vec::new(),
            question_ids: test.questions.iter().map(|q| q.id).collect(),
            duration_secs: test.duration_secs(),
            ticker: None,
            pending_exit: None,
        }
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    pub fn total_questions(&self) -> usize {
        self.question_ids.len()
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Ledger entry for the currently displayed question.
    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers.get(self.current_question_index)
    }

    pub fn answered_count(&self) -> usize {
        self.answers
            .iter()
            .filter(|a| a.selected_option.is_some())
            .count()
    }

    pub fn marked_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_marked).count()
    }

    fn in_progress(&self) -> bool {
        self.status == SessionStatus::InProgress
    }

    /// NotStarted -> InProgress: build the ledger and start the clock.
    pub fn start(&mut self) {
        if self.status != SessionStatus::NotStarted {
            return;
        }
        self.answers = self.question_ids.iter().map(|&id| Answer::new(id)).collect();
        self.time_left_secs = self.duration_secs;
        self.current_question_index = 0;
        self.ticker = Some(Ticker::new());
        self.status = SessionStatus::InProgress;
        info!(
            "attempt {} started: {} questions, {}s on the clock",
            self.attempt_id,
            self.answers.len(),
            self.time_left_secs
        );
    }

    /// Record the user's pick for the displayed question. The UI only
    /// ever sends 0..NUM_OPTIONS; anything else is a caller bug.
    pub fn select_option(&mut self, option: usize) {
        debug_assert!(option < NUM_OPTIONS);
        if !self.in_progress() {
            return;
        }
        if let Some(answer) = self.answers.get_mut(self.current_question_index) {
            answer.selected_option = Some(option);
        }
    }

    /// Flip the mark-for-review flag on the displayed question.
    pub fn toggle_mark(&mut self) {
        if !self.in_progress() {
            return;
        }
        if let Some(answer) = self.answers.get_mut(self.current_question_index) {
            answer.is_marked = !answer.is_marked;
        }
    }

    /// Advance to the next question; no-op on the last one. Answering
    /// first is not required.
    pub fn go_next(&mut self) {
        if !self.in_progress() {
            return;
        }
        if self.current_question_index + 1 < self.question_ids.len() {
            self.current_question_index += 1;
        }
    }

    /// Step back one question; no-op on the first one.
    pub fn go_previous(&mut self) {
        if !self.in_progress() {
            return;
        }
        self.current_question_index = self.current_question_index.saturating_sub(1);
    }

    /// Palette jump straight to any question, answered or not.
    pub fn jump_to(&mut self, index: usize) {
        if !self.in_progress() {
            return;
        }
        if index < self.question_ids.len() {
            self.current_question_index = index;
        }
    }

    /// One second of exam time: accrue it to the displayed question,
    /// run down the clock, force-submit at zero.
    pub fn tick(&mut self) {
        if !self.in_progress() {
            return;
        }
        if let Some(answer) = self.answers.get_mut(self.current_question_index) {
            answer.time_spent_secs += 1;
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        if self.time_left_secs == 0 {
            info!("attempt {} timed out, forcing submit", self.attempt_id);
            self.submit();
        }
    }

    /// Drain the ticker and apply any due seconds. Ticks that land while
    /// an exit confirmation is pending are discarded, so cancelling the
    /// prompt restores the session exactly as it was.
    pub fn poll_timer(&mut self) {
        let due = match &mut self.ticker {
            Some(ticker) => ticker.poll(),
            None => return,
        };
        if self.status != SessionStatus::InProgress {
            return;
        }
        for _ in 0..due {
            self.tick();
        }
    }

    /// Intercept an exit attempt: capture the navigation action and wait
    /// for the user to confirm or cancel.
    pub fn request_exit(&mut self, action: PendingExit) {
        if !self.in_progress() {
            return;
        }
        debug!("attempt {}: exit intercepted ({action:?})", self.attempt_id);
        self.pending_exit = Some(action);
        self.status = SessionStatus::ExitConfirmPending;
    }

    /// Discard the captured exit attempt; nothing else changes.
    pub fn cancel_exit(&mut self) {
        if self.status != SessionStatus::ExitConfirmPending {
            return;
        }
        self.pending_exit = None;
        self.status = SessionStatus::InProgress;
    }

    /// Force-submit and hand the captured navigation action back to the
    /// caller to carry out.
    pub fn confirm_exit(&mut self) -> Option<PendingExit> {
        if self.status != SessionStatus::ExitConfirmPending {
            return None;
        }
        let action = self.pending_exit.take();
        self.submit();
        action
    }

    /// Freeze the ledger and stop the clock. Idempotent: a timeout
    /// racing a user submit leaves exactly one submission.
    pub fn submit(&mut self) {
        match self.status {
            SessionStatus::InProgress | SessionStatus::ExitConfirmPending => {}
            SessionStatus::NotStarted | SessionStatus::Submitted => return,
        }
        self.status = SessionStatus::Submitted;
        self.ticker = None;
        self.pending_exit = None;
        info!(
            "attempt {} submitted: {}/{} answered, {}s left",
            self.attempt_id,
            self.answered_count(),
            self.total_questions(),
            self.time_left_secs
        );
    }
}
