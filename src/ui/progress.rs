use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::progress::{Achievement, ProgressStore, ProgressSummary};
use crate::session::format_clock;

use super::grade_color;

const RECENT_LIMIT: usize = 5;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let store = app.progress();
    let summary = store.summary();

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "YOUR PROGRESS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("this session only".fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    render_stats(frame, chunks[1], &summary);
    render_recent(frame, chunks[2], store);
    render_achievements(frame, chunks[3], &summary);

    let controls = Paragraph::new("esc/enter back")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[4]);
}

fn render_stats(frame: &mut Frame, area: Rect, summary: &ProgressSummary) {
    let stats = [
        ("Quizzes", summary.quizzes_taken.to_string()),
        ("Average", format!("{}%", summary.average_percentage)),
        ("Best", format!("{}%", summary.best_percentage)),
        (
            "Time",
            format_clock(u32::try_from(summary.total_seconds).unwrap_or(u32::MAX)),
        ),
    ];

    let columns = Layout::horizontal([Constraint::Fill(1); 4]).split(area);
    for ((label, value), column) in stats.into_iter().zip(columns.iter()) {
        let widget = Paragraph::new(vec![
            Line::from(Span::styled(value, Style::default().fg(Color::White).bold())),
            Line::from(label.fg(Color::DarkGray)),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray),
        );
        frame.render_widget(widget, *column);
    }
}

fn render_recent(frame: &mut Frame, area: Rect, store: &impl ProgressStore) {
    let lines: Vec<Line> = if store.entries().is_empty() {
        vec![Line::from("No quizzes completed yet.".fg(Color::DarkGray))]
    } else {
        store
            .entries()
            .iter()
            .rev()
            .take(RECENT_LIMIT)
            .map(|entry| {
                let outcome = &entry.outcome;
                Line::from(vec![
                    Span::styled(
                        format!("{:>4}% ", outcome.percentage),
                        Style::default().fg(grade_color(outcome.percentage)).bold(),
                    ),
                    Span::styled(entry.subject.clone(), Style::default().fg(Color::White)),
                    Span::styled(
                        format!(
                            "  {} questions · {}",
                            outcome.total,
                            entry.completed_at.format("%H:%M")
                        ),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(" Recent quizzes ")
            .title_style(Style::default().fg(Color::Cyan))
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_achievements(frame: &mut Frame, area: Rect, summary: &ProgressSummary) {
    let lines: Vec<Line> = Achievement::ALL
        .into_iter()
        .map(|achievement| {
            let unlocked = summary.achievements.contains(&achievement);
            let style = if unlocked {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::styled(if unlocked { "★ " } else { "☆ " }, style),
                Span::styled(achievement.title(), style),
                Span::styled(
                    format!("  {}", achievement.description()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(" Achievements ")
            .title_style(Style::default().fg(Color::Cyan))
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
