use thiserror::Error;

use crate::models::{QuestionError, QuestionKind};

/// Errors returned by quiz session actions.
///
/// None of these are fatal: a rejected action leaves the session exactly as
/// it was, so the caller can ignore the error or surface it to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The question list could not start a session.
    #[error("malformed question: {0}")]
    Malformed(#[from] QuestionError),

    /// A session needs at least one second on the clock.
    #[error("time limit must be at least one second")]
    ZeroTimeLimit,

    /// Feedback for the current question is already shown.
    #[error("question {0} has already been answered")]
    AlreadyAnswered(u32),

    /// `advance` was called before the current question was answered.
    #[error("question {0} must be answered before moving on")]
    NotRevealed(u32),

    /// The session has ended and accepts no more actions.
    #[error("the quiz session is complete")]
    SessionComplete,

    /// The answer type does not fit the question (e.g. text for true/false).
    #[error("answer does not fit a {} question", .0.label())]
    AnswerKindMismatch(QuestionKind),

    /// A multiple-choice answer that is not among the offered choices.
    #[error("'{0}' is not one of the choices")]
    UnknownChoice(String),
}
