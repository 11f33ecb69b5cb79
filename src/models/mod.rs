mod question;

pub use question::{validate_questions, Answer, Deck, Question, QuestionError, QuestionKind};

/// The screen currently shown by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Welcome,
    Quiz,
    Result,
    Progress,
}
