use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let test = &app.test;
    let summary = format!(
        "{} Questions · {} Minutes · {} Marks",
        test.questions.len(),
        test.duration_minutes,
        test.total_marks
    );
    let passing = format!("Passing: {} marks", test.passing_marks);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            test.title.as_str(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(summary.fg(Color::DarkGray)),
        Line::from(passing.fg(Color::DarkGray)),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
