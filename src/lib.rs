//! # pdf-tutor
//!
//! Timed study quizzes in the terminal.
//!
//! The heart of the crate is [`QuizSession`]: an ordered list of questions,
//! the answers given so far, a countdown and the final score. The terminal
//! front end in this crate is one way to drive it; anything that can call
//! `submit_answer`, `advance`, `retreat` and `tick` can.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pdf_tutor::{Quiz, QuizConfig, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::new(QuizConfig::default())?;
//!     quiz.run().await
//! }
//! ```
//!
//! Driving a session directly:
//!
//! ```rust
//! use pdf_tutor::{sample_deck, Answer, GradingPolicy, QuizSession};
//!
//! let deck = sample_deck();
//! let mut session = QuizSession::new(deck.questions, 600, GradingPolicy::Exact).unwrap();
//! session.submit_answer(Answer::text("Photosynthesis")).unwrap();
//! session.advance().unwrap();
//! assert_eq!(session.score().correct, 1);
//! ```

mod app;
mod config;
mod data;
mod models;
mod progress;
mod session;
pub mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use thiserror::Error;
use tracing::{debug, info};

pub use app::App;
pub use config::{ConfigError, QuizConfig};
pub use data::{
    load_deck_from_json, sample_deck, JsonDeck, LoadError, QuestionSource, SampleDeck,
    SAMPLE_DECK_TITLE,
};
pub use models::{
    validate_questions, Answer, AppState, Deck, Question, QuestionError, QuestionKind,
};
pub use progress::{
    Achievement, InMemoryProgress, ProgressEntry, ProgressStore, ProgressSummary,
};
pub use session::{
    format_clock, CompletionReason, Feedback, GradingPolicy, QuestionView, QuizSession, Score,
    SessionError, SessionOutcome, SessionStatus, SessionTimer, TimerEvent,
    DEFAULT_TIME_LIMIT_SECS,
};

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Error loading questions.
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),

    /// The deck could not start a session.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Invalid settings.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz app that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create the app from validated settings.
    pub fn new(config: QuizConfig) -> Result<Self, QuizError> {
        config.validate()?;
        Ok(Self {
            app: App::new(config),
        })
    }

    /// Use a custom question source instead of the one named in `config`.
    pub fn with_source(
        config: QuizConfig,
        source: Box<dyn QuestionSource>,
    ) -> Result<Self, QuizError> {
        config.validate()?;
        Ok(Self {
            app: App::with_source(config, source),
        })
    }

    /// Run the quiz in the terminal.
    ///
    /// This takes over the terminal and returns when the user quits. Must be
    /// awaited inside a multi-threaded tokio runtime since the countdown runs
    /// as a separate task.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        info!("terminal ui started");
        let result = run_event_loop(guard.terminal(), &mut self.app).await;
        drop(guard);
        info!("terminal ui closed");
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

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
) -> Result<(), QuizError> {
    let mut timer: Option<SessionTimer> = None;

    loop {
        sync_timer(&mut timer, app);
        if let Some(active) = timer.as_mut() {
            while let Some(TimerEvent::Tick) = active.try_next() {
                app.tick();
            }
        }
        // Stop the countdown as soon as a tick completes the session.
        sync_timer(&mut timer, app);

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }
                if handle_input(app, key.code) {
                    break;
                }
            }
        }

        tokio::task::yield_now().await;
    }

    if let Some(mut active) = timer.take() {
        active.stop();
    }
    Ok(())
}

/// Keep exactly one countdown running for the active session, none otherwise.
fn sync_timer(timer: &mut Option<SessionTimer>, app: &App) {
    let wanted = app.active_session_id();
    let running = timer.as_ref().map(SessionTimer::session_id);
    if wanted == running {
        return;
    }

    if let Some(mut stale) = timer.take() {
        stale.stop();
    }
    if let Some(session_id) = wanted {
        debug!(session = %session_id, "starting countdown");
        *timer = Some(SessionTimer::start(session_id));
    }
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
        AppState::Progress => handle_progress_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.try_start_quiz();
            false
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.show_progress();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc => app.abandon_quiz(),
        KeyCode::Enter => app.confirm(),
        KeyCode::Left => app.retreat(),
        KeyCode::Right => {
            if app.session().is_some_and(QuizSession::is_revealed) {
                app.advance();
            }
        }
        KeyCode::Up => app.select_previous_option(),
        KeyCode::Down => app.select_next_option(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(c) if app.is_typing() => app.push_char(c),
        KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Char(' ') => app.confirm(),
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.show_progress();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.try_start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_progress_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => {
            app.close_progress();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
