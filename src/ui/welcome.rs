use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::session::format_clock;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(12),
        Constraint::Fill(1),
    ])
    .split(area);

    let config = app.config();
    let source = match &config.questions {
        Some(path) => path.display().to_string(),
        None => "built-in sample deck".to_string(),
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "PDF TUTOR",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(source.fg(Color::DarkGray)),
        Line::from(
            format!(
                "{} time limit · {:?} grading",
                format_clock(config.time_limit_secs),
                config.grading
            )
            .fg(Color::DarkGray),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  p progress  ·  q quit".fg(Color::DarkGray)),
    ];

    if let Some(message) = app.message() {
        content.push(Line::from(""));
        content.push(Line::from(message.fg(Color::Red)));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
