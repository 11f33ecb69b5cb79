use std::path::PathBuf;

use thiserror::Error;

use crate::data::{JsonDeck, QuestionSource, SampleDeck};
use crate::session::{GradingPolicy, DEFAULT_TIME_LIMIT_SECS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("time limit must be at least one second")]
    ZeroTimeLimit,
}

/// Settings for every session the app starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// Deck file; the built-in sample deck is used when absent.
    pub questions: Option<PathBuf>,
    pub time_limit_secs: u32,
    pub grading: GradingPolicy,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions: None,
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            grading: GradingPolicy::default(),
        }
    }
}

impl QuizConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_limit_secs == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }

    pub fn question_source(&self) -> Box<dyn QuestionSource> {
        match &self.questions {
            Some(path) => Box::new(JsonDeck::new(path.clone())),
            None => Box::new(SampleDeck),
        }
    }
}
