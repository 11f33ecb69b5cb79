//! Quiz session controller.
//!
//! A [`QuizSession`] owns the question list, the current position, the
//! recorded answers and the remaining time. The presentation layer reads it
//! through [`QuizSession::current`] and drives it with four actions:
//! `submit_answer`, `advance`, `retreat` and `tick`.

mod controller;
mod error;
mod grading;
mod outcome;
mod timer;

pub use controller::{Feedback, QuestionView, QuizSession};
pub use error::SessionError;
pub use grading::GradingPolicy;
pub use outcome::{
    format_clock, CompletionReason, Score, SessionOutcome, SessionStatus,
    DEFAULT_TIME_LIMIT_SECS,
};
pub use timer::{SessionTimer, TimerEvent};
