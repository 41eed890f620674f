use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

use super::OPTION_LABELS;

const QUESTION_PREVIEW_LENGTH: usize = 48;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(results) = app.results() else {
        return;
    };

    let section_rows = results.sections.len() as u16;
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Length(if section_rows > 0 { section_rows + 2 } else { 0 }),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], app);
    if section_rows > 0 {
        render_sections(frame, chunks[2], app);
    }
    render_question_breakdown(frame, chunks[3], app);
    render_controls(frame, chunks[4]);
}

fn grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, app: &App) {
    let results = app.results().unwrap();
    let (verdict, verdict_color) = if results.passed {
        ("PASSED", Color::Green)
    } else {
        ("FAILED", Color::Red)
    };
    let counts = format!(
        "{} attempted · {} correct · {} wrong · {} skipped",
        results.attempted, results.correct_count, results.incorrect_count, results.unanswered
    );

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!(
                    "{:.2} / {}  ({:.1}%)  ",
                    results.score, results.total_marks, results.percentage
                ),
                Style::default().fg(grade_color(results.percentage)).bold(),
            ),
            Span::styled(verdict, Style::default().fg(verdict_color).bold()),
        ]),
        Line::from(counts.fg(Color::DarkGray)),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_sections(frame: &mut Frame, area: Rect, app: &App) {
    let results = app.results().unwrap();
    let lines: Vec<Line> = results
        .sections
        .iter()
        .map(|section| {
            Line::from(vec![
                Span::styled(
                    format!("{:<28}", section.name),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!(
                        "{}/{} correct, {} attempted",
                        section.correct, section.total, section.attempted
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let answers = app.session.answers();
    let lines: Vec<Line> = answers
        .iter()
        .zip(app.test.questions.iter())
        .enumerate()
        .map(|(index, (answer, question))| {
            let is_correct = answer.selected_option == Some(question.correct_answer);
            let (symbol, color) = if is_correct {
                ("+", Color::Green)
            } else if answer.selected_option.is_some() {
                ("-", Color::Red)
            } else {
                ("·", Color::DarkGray)
            };

            let picked = answer
                .selected_option
                .and_then(|i| OPTION_LABELS.get(i))
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string());
            let verdict = format!(
                "{} (key {})",
                picked, OPTION_LABELS[question.correct_answer]
            );

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:3}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<w$} ", truncate(&question.text), w = QUESTION_PREVIEW_LENGTH + 3),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(verdict, Style::default().fg(color)),
                Span::styled(
                    format!("  {}s", answer.time_spent_secs),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.result_scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn truncate(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r retake  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
