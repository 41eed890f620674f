//! # mock-test
//!
//! A terminal mock-exam simulator for Telangana Police recruitment
//! preparation: timed multiple-choice tests with free navigation, a
//! question palette, mark-for-review, an exit guard, and a scored
//! results report.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mock_test::{Exam, ExamError};
//!
//! fn main() -> Result<(), ExamError> {
//!     // Resolve a test from a JSON catalog
//!     let exam = Exam::from_catalog("catalog.json", Some("si-mock-1"))?;
//!
//!     // Run the exam in the terminal
//!     exam.run()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The exam-session engine (`ExamSession`, `Results`, `Catalog`) is
//! plain data and functions with no terminal coupling, so it can be
//! embedded behind a different front-end as well.

mod app;
mod data;
mod models;
mod results;
mod session;
pub mod terminal;
mod timer;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub use app::{App, Focus, PALETTE_COLUMNS};
pub use data::{Catalog, LoadError};
pub use models::{Difficulty, Question, Section, Subject, Test, NUM_OPTIONS};
pub use results::{Results, ScoringPolicy, SectionOutcome};
pub use session::{Answer, ExamSession, PendingExit, SessionStatus};
pub use timer::Ticker;

/// How long one event-loop pass waits for input before checking the
/// countdown. Sub-second so the timer display never lags a full tick.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Error type for exam operations.
#[derive(Debug)]
pub enum ExamError {
    /// Error loading or resolving the test catalog.
    Load(LoadError),
    /// IO error during exam execution.
    Io(io::Error),
}

impl std::fmt::Display for ExamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamError::Load(e) => write!(f, "Failed to load test: {}", e),
            ExamError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ExamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExamError::Load(e) => Some(e),
            ExamError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for ExamError {
    fn from(err: LoadError) -> Self {
        ExamError::Load(err)
    }
}

impl From<io::Error> for ExamError {
    fn from(err: io::Error) -> Self {
        ExamError::Io(err)
    }
}

/// A mounted exam that can be run in the terminal.
pub struct Exam {
    app: App,
}

impl Exam {
    /// Create an exam for an already-resolved test.
    pub fn new(test: Test) -> Self {
        Self {
            app: App::new(test),
        }
    }

    /// Load a catalog file and resolve a test in it. `None` picks the
    /// first test; an unknown id surfaces as `LoadError::TestNotFound`.
    pub fn from_catalog<P: AsRef<Path>>(
        path: P,
        test_id: Option<&str>,
    ) -> Result<Self, ExamError> {
        let catalog = Catalog::load(path)?;
        let test = catalog.resolve(test_id)?.clone();
        Ok(Self::new(test))
    }

    /// Run the exam in the terminal.
    ///
    /// Takes over the terminal, drives the timed session, and returns
    /// when the user quits (or confirms quitting mid-exam).
    pub fn run(mut self) -> Result<(), ExamError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), ExamError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if app.should_quit {
            break;
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_input(app, key);
                }
            }
        }

        app.on_poll();
    }

    Ok(())
}

fn handle_input(app: &mut App, key: KeyEvent) {
    // Ctrl+C is just another exit attempt; mid-exam it hits the guard.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }

    match app.session.status() {
        SessionStatus::NotStarted => handle_welcome_input(app, key.code),
        SessionStatus::ExitConfirmPending => handle_exit_confirm_input(app, key.code),
        SessionStatus::InProgress if app.confirm_submit => {
            handle_submit_confirm_input(app, key.code)
        }
        SessionStatus::InProgress => match app.focus {
            Focus::Question => handle_exam_input(app, key.code),
            Focus::Palette => handle_palette_input(app, key.code),
        },
        SessionStatus::Submitted => handle_result_input(app, key.code),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.start(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.request_quit(),
        _ => {}
    }
}

fn handle_exam_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c @ '1'..='4') => {
            app.select_option(c as usize - '1' as usize);
        }
        KeyCode::Char(c @ 'a'..='d') => {
            app.select_option(c as usize - 'a' as usize);
        }
        KeyCode::Left | KeyCode::Char('h') => app.go_previous(),
        KeyCode::Right | KeyCode::Char('l') => app.go_next(),
        KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_mark(),
        KeyCode::Tab => app.toggle_palette_focus(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.open_submit_prompt(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.request_quit(),
        _ => {}
    }
}

fn handle_palette_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Char('h') => app.palette_move(-1),
        KeyCode::Right | KeyCode::Char('l') => app.palette_move(1),
        KeyCode::Up | KeyCode::Char('k') => app.palette_move(-(PALETTE_COLUMNS as isize)),
        KeyCode::Down | KeyCode::Char('j') => app.palette_move(PALETTE_COLUMNS as isize),
        KeyCode::Enter => app.palette_jump(),
        KeyCode::Tab | KeyCode::Esc => app.toggle_palette_focus(),
        _ => {}
    }
}

fn handle_exit_confirm_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_exit(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_exit(),
        _ => {}
    }
}

fn handle_submit_confirm_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_submit_prompt(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_submit_prompt(),
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retake(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.request_quit(),
        _ => {}
    }
}
