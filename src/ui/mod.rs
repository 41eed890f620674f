mod confirm;
mod exam;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::session::SessionStatus;

pub const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.session.status() {
        SessionStatus::NotStarted => welcome::render(frame, area, app),
        SessionStatus::InProgress | SessionStatus::ExitConfirmPending => {
            exam::render(frame, area, app);
            if app.session.status() == SessionStatus::ExitConfirmPending {
                confirm::render_exit(frame, area, app);
            } else if app.confirm_submit {
                confirm::render_submit(frame, area, app);
            }
        }
        SessionStatus::Submitted => result::render(frame, area, app),
    }
}
