mod progress;
mod quiz;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Welcome => welcome::render(frame, area, app),
        AppState::Quiz => quiz::render(frame, area, app),
        AppState::Result => result::render(frame, area, app),
        AppState::Progress => progress::render(frame, area, app),
    }
}

/// Color for a score percentage.
fn grade_color(percentage: u32) -> Color {
    match percentage {
        80..=100 => Color::Green,
        60..=79 => Color::Yellow,
        _ => Color::Red,
    }
}
