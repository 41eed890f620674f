//! Centered confirmation overlays: the exit guard prompt and the
//! pre-submit "are you sure".

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::App;

pub fn render_exit(frame: &mut Frame, area: Rect, app: &App) {
    let answered = app.session.answered_count();
    let total = app.session.total_questions();
    render_prompt(
        frame,
        area,
        "Leave exam?",
        vec![
            Line::from("Leaving submits the exam as it stands."),
            Line::from(format!("{answered} of {total} answered so far.").fg(Color::DarkGray)),
        ],
    );
}

pub fn render_submit(frame: &mut Frame, area: Rect, app: &App) {
    let answered = app.session.answered_count();
    let total = app.session.total_questions();
    let marked = app.session.marked_count();
    let mut lines = vec![Line::from(format!("{answered} of {total} answered."))];
    if marked > 0 {
        lines.push(Line::from(
            format!("{marked} still marked for review.").fg(Color::Yellow),
        ));
    }
    render_prompt(frame, area, "Submit exam?", lines);
}

fn render_prompt(frame: &mut Frame, area: Rect, title: &str, body: Vec<Line>) {
    let popup = centered(area, 46, body.len() as u16 + 6);
    frame.render_widget(Clear, popup);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
    ];
    content.extend(body);
    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("y", Style::default().fg(Color::Green).bold()),
        Span::raw(" confirm   "),
        Span::styled("n", Style::default().fg(Color::Red).bold()),
        Span::raw(" cancel"),
    ]));

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::Cyan),
    );
    frame.render_widget(widget, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
