use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus, PALETTE_COLUMNS};
use crate::models::Question;
use crate::session::Answer;

use super::OPTION_LABELS;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let palette_rows = app.test.questions.len().div_ceil(PALETTE_COLUMNS) as u16;

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(palette_rows + 2),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let question = app.current_question();
    let answer = app.session.current_answer();

    render_header(frame, chunks[0], app);
    render_question_meta(frame, chunks[1], question, answer);
    render_question_text(frame, chunks[2], &question.text);
    render_options(frame, chunks[3], question, answer);
    render_palette(frame, chunks[4], app);
    render_controls(frame, chunks[5], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "{}/{}",
        app.session.current_question_index() + 1,
        app.session.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Left)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);

    let time_left = app.session.time_left_secs();
    let clock_color = if time_left < 60 {
        Color::Red
    } else {
        Color::Gray
    };
    let clock = Paragraph::new(format_clock(time_left))
        .alignment(Alignment::Right)
        .fg(clock_color)
        .bold();
    frame.render_widget(clock, area);
}

fn render_question_meta(frame: &mut Frame, area: Rect, question: &Question, answer: Option<&Answer>) {
    let mut spans = vec![Span::styled(
        format!("{} · {} · {}", question.subject, question.topic, question.difficulty),
        Style::default().fg(Color::DarkGray),
    )];
    if answer.is_some_and(|a| a.is_marked) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "[marked]",
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, question: &Question, answer: Option<&Answer>) {
    let selected = answer.and_then(|a| a.selected_option);
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_selected = selected == Some(index);
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_palette(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.session.current_question_index();
    let palette_focused = app.focus == Focus::Palette;

    let mut lines: Vec<Line> = Vec::new();
    let mut row: Vec<Span> = Vec::new();
    for (index, answer) in app.session.answers().iter().enumerate() {
        let mut style = cell_style(answer, index == current);
        if palette_focused && index == app.palette_cursor {
            style = style.reversed();
        }
        row.push(Span::styled(format!("{:>3} ", index + 1), style));
        if (index + 1) % PALETTE_COLUMNS == 0 {
            lines.push(Line::from(std::mem::take(&mut row)));
        }
    }
    if !row.is_empty() {
        lines.push(Line::from(row));
    }

    let border_style = if palette_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Palette ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn cell_style(answer: &Answer, is_current: bool) -> Style {
    let base = if answer.is_marked {
        Style::default().fg(Color::Yellow)
    } else if answer.selected_option.is_some() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if is_current {
        base.bold().underlined()
    } else {
        base
    }
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let text = match app.focus {
        Focus::Question => {
            "1-4 answer  ·  h/l move  ·  m mark  ·  tab palette  ·  s submit  ·  q exit"
        }
        Focus::Palette => "arrows move  ·  enter jump  ·  tab back",
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn format_clock(total_secs: u32) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(3725), "1:02:05");
    }
}
