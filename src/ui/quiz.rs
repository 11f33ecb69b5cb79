use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{Answer, QuestionKind};
use crate::session::{format_clock, Feedback, QuestionView, QuizSession};

const OPTION_LABELS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];
const LOW_TIME_SECS: u32 = 60;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let view = session.current();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app, session);
    render_progress_bar(frame, chunks[1], &view);
    render_kind(frame, chunks[2], view.kind);
    render_prompt(frame, chunks[3], view.prompt);

    match view.kind {
        QuestionKind::MultipleChoice => {
            render_options(frame, chunks[4], view.choices, app.selected_option(), &view);
        }
        QuestionKind::TrueFalse => {
            let labels = ["True".to_string(), "False".to_string()];
            render_options(frame, chunks[4], &labels, app.selected_option(), &view);
        }
        QuestionKind::FillInBlank => render_text_input(frame, chunks[4], app, &view),
    }

    match view.feedback {
        Some(feedback) => render_feedback(frame, chunks[5], feedback),
        None => {
            if let Some(message) = app.message() {
                let widget = Paragraph::new(message).fg(Color::Red);
                frame.render_widget(widget, chunks[5]);
            }
        }
    }

    render_controls(frame, chunks[6], &view, session.is_last_question());
}

fn render_header(frame: &mut Frame, area: Rect, app: &App, session: &QuizSession) {
    let remaining = session.remaining_seconds();
    let clock_color = if remaining <= LOW_TIME_SECS {
        Color::Red
    } else {
        Color::Gray
    };

    let columns = Layout::horizontal([Constraint::Fill(1), Constraint::Length(8)]).split(area);

    let title = Paragraph::new(app.deck_title()).fg(Color::Cyan).bold();
    let clock = Paragraph::new(format_clock(remaining))
        .alignment(Alignment::Right)
        .fg(clock_color)
        .bold();

    frame.render_widget(title, columns[0]);
    frame.render_widget(clock, columns[1]);
}

fn render_progress_bar(frame: &mut Frame, area: Rect, view: &QuestionView) {
    let ratio = view.number as f64 / view.total as f64;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("Question {} of {}", view.number, view.total));
    frame.render_widget(gauge, area);
}

fn render_kind(frame: &mut Frame, area: Rect, kind: QuestionKind) {
    let widget = Paragraph::new(kind.label()).fg(Color::Blue);
    frame.render_widget(widget, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

/// Style for one option line, taking feedback into account.
fn option_style(label: &str, is_selected: bool, view: &QuestionView) -> (Style, &'static str) {
    let as_answer = match view.kind {
        QuestionKind::TrueFalse => Answer::Bool(label == "True"),
        _ => Answer::text(label),
    };

    match view.feedback {
        Some(feedback) => {
            if *feedback.correct_answer == as_answer {
                (Style::default().fg(Color::Green).bold(), " ✓")
            } else if view.submitted == Some(&as_answer) {
                (Style::default().fg(Color::Red).bold(), " ✗")
            } else {
                (Style::default().fg(Color::DarkGray), "")
            }
        }
        None if is_selected => (Style::default().fg(Color::Cyan).bold(), ""),
        None => (Style::default().fg(Color::Gray), ""),
    }
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[String],
    selected: usize,
    view: &QuestionView,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_selected = index == selected && view.feedback.is_none();
        let (style, mark) = option_style(option, is_selected, view);
        let marker = if is_selected { ">" } else { " " };
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.as_str(), style),
            Span::styled(mark, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_text_input(frame: &mut Frame, area: Rect, app: &App, view: &QuestionView) {
    let (text, border) = match (view.feedback, view.submitted) {
        (Some(feedback), Some(answer)) => {
            let color = if feedback.is_correct {
                Color::Green
            } else {
                Color::Red
            };
            (answer.to_string(), color)
        }
        _ => (format!("{}_", app.text_input()), Color::Cyan),
    };

    let widget = Paragraph::new(text).fg(Color::White).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Your answer ")
            .padding(Padding::horizontal(1)),
    );

    let rows = Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).split(area);
    frame.render_widget(widget, rows[0]);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: Feedback) {
    let (heading, color) = if feedback.is_correct {
        ("Correct!".to_string(), Color::Green)
    } else {
        (
            format!("Incorrect. Answer: {}", feedback.correct_answer),
            Color::Red,
        )
    };

    let widget = Paragraph::new(vec![
        Line::from(Span::styled(heading, Style::default().fg(color).bold())),
        Line::from(Span::styled(
            feedback.explanation,
            Style::default().fg(color),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(color)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, view: &QuestionView, is_last: bool) {
    let text = if view.feedback.is_some() {
        if is_last {
            "enter finish quiz  ·  ← previous  ·  esc leave"
        } else {
            "enter next question  ·  ← previous  ·  esc leave"
        }
    } else if view.kind == QuestionKind::FillInBlank {
        "type answer  ·  enter submit  ·  ← previous  ·  esc leave"
    } else {
        "↑/↓ select  ·  enter submit  ·  ← previous  ·  esc leave"
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
