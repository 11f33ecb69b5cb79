use std::str::FromStr;

use crate::models::{Answer, Question, QuestionKind};

/// How submitted answers are compared against the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradingPolicy {
    /// Raw equality. Fill-in answers are case and whitespace sensitive.
    #[default]
    Exact,
    /// Fill-in answers are trimmed and compared ignoring case.
    Lenient,
}

impl GradingPolicy {
    pub fn is_correct(self, question: &Question, answer: &Answer) -> bool {
        match (self, question.kind, answer, &question.correct_answer) {
            (
                GradingPolicy::Lenient,
                QuestionKind::FillInBlank,
                Answer::Text(given),
                Answer::Text(expected),
            ) => given.trim().to_lowercase() == expected.trim().to_lowercase(),
            _ => *answer == question.correct_answer,
        }
    }
}

impl FromStr for GradingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(GradingPolicy::Exact),
            "lenient" => Ok(GradingPolicy::Lenient),
            other => Err(format!(
                "unknown grading policy '{other}' (expected exact or lenient)"
            )),
        }
    }
}
