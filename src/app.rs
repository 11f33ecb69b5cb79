use tracing::{error, warn};
use uuid::Uuid;

use crate::config::QuizConfig;
use crate::data::QuestionSource;
use crate::models::{Answer, AppState, QuestionKind};
use crate::progress::{InMemoryProgress, ProgressEntry, ProgressStore};
use crate::session::{QuizSession, SessionError};
use crate::QuizError;

const TRUE_FALSE_OPTIONS: usize = 2;

pub struct App {
    pub state: AppState,
    config: QuizConfig,
    source: Box<dyn QuestionSource>,
    deck_title: String,
    session: Option<QuizSession>,
    selected_option: usize,
    text_input: String,
    result_scroll: usize,
    progress: InMemoryProgress,
    return_to: AppState,
    message: Option<String>,
}

impl App {
    pub fn new(config: QuizConfig) -> Self {
        let source = config.question_source();
        Self::with_source(config, source)
    }

    pub fn with_source(config: QuizConfig, source: Box<dyn QuestionSource>) -> Self {
        Self {
            state: AppState::Welcome,
            config,
            source,
            deck_title: String::new(),
            session: None,
            selected_option: 0,
            text_input: String::new(),
            result_scroll: 0,
            progress: InMemoryProgress::new(),
            return_to: AppState::Welcome,
            message: None,
        }
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Id of the session the countdown should be running for, if any.
    pub fn active_session_id(&self) -> Option<Uuid> {
        self.session
            .as_ref()
            .filter(|s| s.is_active())
            .map(QuizSession::id)
    }

    pub fn deck_title(&self) -> &str {
        &self.deck_title
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn text_input(&self) -> &str {
        &self.text_input
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn progress(&self) -> &InMemoryProgress {
        &self.progress
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Load a fresh deck and enter the quiz screen. Any previous session is
    /// discarded.
    pub fn start_quiz(&mut self) -> Result<(), QuizError> {
        self.session = None;
        self.message = None;

        let deck = self.source.load()?;
        let session = QuizSession::new(
            deck.questions,
            self.config.time_limit_secs,
            self.config.grading,
        )?;

        self.deck_title = deck.title;
        self.session = Some(session);
        self.reset_input();
        self.result_scroll = 0;
        self.state = AppState::Quiz;
        Ok(())
    }

    /// Like [`App::start_quiz`] but keeps the error for display.
    pub fn try_start_quiz(&mut self) {
        if let Err(e) = self.start_quiz() {
            error!("could not start quiz: {e}");
            self.message = Some(e.to_string());
            self.state = AppState::Welcome;
        }
    }

    /// Leave the quiz screen and drop the running session.
    pub fn abandon_quiz(&mut self) {
        if let Some(session) = self.session.take() {
            warn!(session = %session.id(), "quiz abandoned");
        }
        self.reset_input();
        self.state = AppState::Welcome;
    }

    fn option_count(&self) -> usize {
        match &self.session {
            Some(session) => match session.current_question().kind {
                QuestionKind::MultipleChoice => session.current_question().choices.len(),
                QuestionKind::TrueFalse => TRUE_FALSE_OPTIONS,
                QuestionKind::FillInBlank => 0,
            },
            None => 0,
        }
    }

    fn input_locked(&self) -> bool {
        self.session
            .as_ref()
            .is_none_or(|s| !s.is_active() || s.is_revealed())
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 && !self.input_locked() {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 && !self.input_locked() {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    pub fn is_typing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| {
            s.current_question().kind == QuestionKind::FillInBlank && !self.input_locked()
        })
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_typing() {
            self.text_input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.is_typing() {
            self.text_input.pop();
        }
    }

    /// Enter: submit while unanswered, move on once feedback is shown.
    pub fn confirm(&mut self) {
        let revealed = self.session.as_ref().is_some_and(QuizSession::is_revealed);
        if revealed {
            self.advance();
        } else {
            self.submit_answer();
        }
    }

    pub fn submit_answer(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let question = session.current_question();
        let answer = match question.kind {
            QuestionKind::MultipleChoice => match question.choices.get(self.selected_option) {
                Some(choice) => Answer::Text(choice.clone()),
                None => return,
            },
            QuestionKind::TrueFalse => Answer::Bool(self.selected_option == 0),
            QuestionKind::FillInBlank => {
                if self.text_input.trim().is_empty() {
                    return;
                }
                Answer::Text(self.text_input.clone())
            }
        };

        let result = session.submit_answer(answer);
        self.report(result);
    }

    pub fn advance(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let result = session.advance();
        let moved = result.is_ok();
        self.report(result);
        if moved {
            self.reset_input();
            self.sync_completion();
        }
    }

    pub fn retreat(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.retreat() {
            Ok(true) => {
                self.message = None;
                self.restore_input();
            }
            Ok(false) => {}
            Err(e) => self.report(Err(e)),
        }
    }

    /// Apply one second of the countdown.
    pub fn tick(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.tick();
            self.sync_completion();
        }
    }

    pub fn show_progress(&mut self) {
        if self.state != AppState::Progress {
            self.return_to = self.state;
            self.state = AppState::Progress;
        }
    }

    pub fn close_progress(&mut self) {
        if self.state == AppState::Progress {
            self.state = self.return_to;
        }
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self
            .session
            .as_ref()
            .map_or(0, |s| s.total_questions().saturating_sub(1));
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    fn report(&mut self, result: Result<(), SessionError>) {
        match result {
            Ok(_) => self.message = None,
            Err(e) => {
                warn!("action rejected: {e}");
                self.message = Some(e.to_string());
            }
        }
    }

    /// Move to the result screen and record progress the first time the
    /// session is seen complete.
    fn sync_completion(&mut self) {
        if self.state != AppState::Quiz {
            return;
        }
        let Some(outcome) = self.session.as_ref().and_then(QuizSession::outcome) else {
            return;
        };

        self.progress
            .record(ProgressEntry::new(self.deck_title.clone(), outcome));
        self.result_scroll = 0;
        self.state = AppState::Result;
    }

    fn reset_input(&mut self) {
        self.selected_option = 0;
        self.text_input.clear();
    }

    /// Pre-fill the input with the answer previously given, if any.
    fn restore_input(&mut self) {
        self.reset_input();
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let question = session.current_question();
        match session.answer_for(question.id) {
            Some(Answer::Bool(value)) => self.selected_option = if *value { 0 } else { 1 },
            Some(Answer::Text(text)) => match question.kind {
                QuestionKind::MultipleChoice => {
                    self.selected_option = question
                        .choices
                        .iter()
                        .position(|c| c == text)
                        .unwrap_or(0);
                }
                _ => self.text_input = text.clone(),
            },
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleDeck;
    use crate::session::{CompletionReason, SessionStatus};

    fn app() -> App {
        App::with_source(QuizConfig::default(), Box::new(SampleDeck))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.push_char(c);
        }
    }

    #[test]
    fn test_full_run_records_progress_once() {
        let mut app = app();
        app.start_quiz().unwrap();
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.deck_title(), "Photosynthesis");

        // Q1: Photosynthesis is the second choice.
        app.select_next_option();
        app.confirm();
        app.confirm();
        // Q2: fill in.
        type_text(&mut app, "chlorophyll");
        app.confirm();
        app.confirm();
        // Q3: True is the first option.
        app.confirm();
        app.confirm();
        // Q4: Oxygen is the third choice.
        app.select_next_option();
        app.select_next_option();
        app.confirm();
        app.confirm();
        // Q5
        type_text(&mut app, "leaves");
        app.confirm();
        app.confirm();

        assert_eq!(app.state, AppState::Result);
        let outcome = app.session().unwrap().outcome().unwrap();
        assert_eq!((outcome.correct, outcome.total, outcome.percentage), (5, 5, 100));
        assert_eq!(app.progress().entries().len(), 1);

        app.tick();
        app.confirm();
        assert_eq!(app.progress().entries().len(), 1);
    }

    #[test]
    fn test_blank_fill_in_not_submitted() {
        let mut app = app();
        app.start_quiz().unwrap();
        app.confirm();
        app.confirm();
        type_text(&mut app, "   ");
        app.confirm();
        assert!(!app.session().unwrap().is_revealed());
    }

    #[test]
    fn test_selection_locked_after_reveal() {
        let mut app = app();
        app.start_quiz().unwrap();
        app.confirm();
        app.select_next_option();
        assert_eq!(app.selected_option(), 0);
    }

    #[test]
    fn test_retreat_restores_previous_answer() {
        let mut app = app();
        app.start_quiz().unwrap();
        app.select_next_option();
        app.confirm();
        app.confirm();
        type_text(&mut app, "leaf");
        app.confirm();

        app.retreat();
        assert_eq!(app.session().unwrap().current_index(), 0);
        assert_eq!(app.selected_option(), 1);
        assert!(!app.session().unwrap().is_revealed());
    }

    #[test]
    fn test_timeout_moves_to_results() {
        let config = QuizConfig {
            time_limit_secs: 3,
            ..QuizConfig::default()
        };
        let mut app = App::with_source(config, Box::new(SampleDeck));
        app.start_quiz().unwrap();
        let id = app.active_session_id();
        assert!(id.is_some());

        for _ in 0..3 {
            app.tick();
        }
        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.active_session_id(), None);
        let session = app.session().unwrap();
        assert_eq!(session.status(), SessionStatus::Complete);
        assert_eq!(session.completion_reason(), Some(CompletionReason::TimeExpired));
        assert_eq!(app.progress().entries().len(), 1);
    }

    #[test]
    fn test_abandon_discards_session() {
        let mut app = app();
        app.start_quiz().unwrap();
        app.confirm();
        app.abandon_quiz();
        assert_eq!(app.state, AppState::Welcome);
        assert!(app.session().is_none());
        assert!(app.progress().entries().is_empty());
    }

    #[test]
    fn test_rejected_action_sets_message() {
        let mut app = app();
        app.start_quiz().unwrap();
        app.advance();
        assert!(app.message().is_some());
        assert_eq!(app.session().unwrap().current_index(), 0);
    }

    #[test]
    fn test_progress_screen_returns() {
        let mut app = app();
        app.show_progress();
        assert_eq!(app.state, AppState::Progress);
        app.close_progress();
        assert_eq!(app.state, AppState::Welcome);
    }
}
