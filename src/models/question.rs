use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three question formats a deck can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    FillInBlank,
    TrueFalse,
}

impl QuestionKind {
    /// Label shown above the prompt.
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "Multiple Choice",
            QuestionKind::FillInBlank => "Fill in the Blank",
            QuestionKind::TrueFalse => "True/False",
        }
    }

    /// Whether `answer` has the shape this kind expects.
    pub fn accepts(self, answer: &Answer) -> bool {
        matches!(
            (self, answer),
            (QuestionKind::TrueFalse, Answer::Bool(_))
                | (QuestionKind::MultipleChoice, Answer::Text(_))
                | (QuestionKind::FillInBlank, Answer::Text(_))
        )
    }
}

/// A submitted or expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Bool(bool),
}

impl Answer {
    pub fn text(value: impl Into<String>) -> Self {
        Answer::Text(value.into())
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Text(text) => f.write_str(text),
            Answer::Bool(true) => f.write_str("True"),
            Answer::Bool(false) => f.write_str("False"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub kind: QuestionKind,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    pub correct_answer: Answer,
    pub explanation: String,
}

/// A titled, ordered list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    pub questions: Vec<Question>,
}

/// Reasons a question or deck cannot start a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("deck contains no questions")]
    Empty,

    #[error("question id {0} appears more than once")]
    DuplicateId(u32),

    #[error("question {id} needs at least 2 choices, found {found}")]
    TooFewChoices { id: u32, found: usize },

    #[error("question {id} has choices but is not multiple choice")]
    UnexpectedChoices { id: u32 },

    #[error("question {id}: correct answer does not match kind {kind:?}")]
    AnswerKindMismatch { id: u32, kind: QuestionKind },

    #[error("question {id}: correct answer {answer:?} is not one of the choices")]
    AnswerNotAChoice { id: u32, answer: String },
}

impl Question {
    pub fn multiple_choice(
        id: u32,
        prompt: impl Into<String>,
        choices: &[&str],
        correct: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind: QuestionKind::MultipleChoice,
            prompt: prompt.into(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            correct_answer: Answer::Text(correct.into()),
            explanation: explanation.into(),
        }
    }

    pub fn fill_in_blank(
        id: u32,
        prompt: impl Into<String>,
        correct: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind: QuestionKind::FillInBlank,
            prompt: prompt.into(),
            choices: Vec::new(),
            correct_answer: Answer::Text(correct.into()),
            explanation: explanation.into(),
        }
    }

    pub fn true_false(
        id: u32,
        prompt: impl Into<String>,
        correct: bool,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind: QuestionKind::TrueFalse,
            prompt: prompt.into(),
            choices: Vec::new(),
            correct_answer: Answer::Bool(correct),
            explanation: explanation.into(),
        }
    }

    /// Check the question against the contract for its kind.
    pub fn validate(&self) -> Result<(), QuestionError> {
        let id = self.id;

        if !self.kind.accepts(&self.correct_answer) {
            return Err(QuestionError::AnswerKindMismatch {
                id,
                kind: self.kind,
            });
        }

        match self.kind {
            QuestionKind::MultipleChoice => {
                if self.choices.len() < 2 {
                    return Err(QuestionError::TooFewChoices {
                        id,
                        found: self.choices.len(),
                    });
                }
                if let Answer::Text(correct) = &self.correct_answer {
                    if !self.choices.iter().any(|c| c == correct) {
                        return Err(QuestionError::AnswerNotAChoice {
                            id,
                            answer: correct.clone(),
                        });
                    }
                }
            }
            QuestionKind::FillInBlank | QuestionKind::TrueFalse => {
                if !self.choices.is_empty() {
                    return Err(QuestionError::UnexpectedChoices { id });
                }
            }
        }

        Ok(())
    }
}

/// Validate every question and reject empty decks and repeated ids.
pub fn validate_questions(questions: &[Question]) -> Result<(), QuestionError> {
    if questions.is_empty() {
        return Err(QuestionError::Empty);
    }

    let mut seen = HashSet::with_capacity(questions.len());
    for question in questions {
        if !seen.insert(question.id) {
            return Err(QuestionError::DuplicateId(question.id));
        }
        question.validate()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mcq() -> Question {
        Question::multiple_choice(1, "Pick one", &["A", "B"], "A", "Because A.")
    }

    #[test]
    fn test_valid_questions_pass() {
        let questions = vec![
            mcq(),
            Question::fill_in_blank(2, "The ___", "blank", "It was blank."),
            Question::true_false(3, "Yes?", true, "Yes."),
        ];
        assert_eq!(validate_questions(&questions), Ok(()));
    }

    #[test]
    fn test_empty_deck_rejected() {
        assert_eq!(validate_questions(&[]), Err(QuestionError::Empty));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let questions = vec![mcq(), Question::true_false(1, "Again?", false, "No.")];
        assert_eq!(
            validate_questions(&questions),
            Err(QuestionError::DuplicateId(1))
        );
    }

    #[test]
    fn test_too_few_choices() {
        let question = Question::multiple_choice(4, "Only one", &["A"], "A", "");
        assert_eq!(
            question.validate(),
            Err(QuestionError::TooFewChoices { id: 4, found: 1 })
        );
    }

    #[test]
    fn test_answer_kind_mismatch() {
        let mut question = Question::true_false(5, "Bool?", true, "");
        question.correct_answer = Answer::text("true");
        assert_eq!(
            question.validate(),
            Err(QuestionError::AnswerKindMismatch {
                id: 5,
                kind: QuestionKind::TrueFalse
            })
        );

        let mut question = Question::fill_in_blank(6, "Text?", "x", "");
        question.correct_answer = Answer::Bool(false);
        assert!(matches!(
            question.validate(),
            Err(QuestionError::AnswerKindMismatch { id: 6, .. })
        ));
    }

    #[test]
    fn test_correct_answer_must_be_a_choice() {
        let question = Question::multiple_choice(7, "?", &["A", "B"], "C", "");
        assert_eq!(
            question.validate(),
            Err(QuestionError::AnswerNotAChoice {
                id: 7,
                answer: "C".to_string()
            })
        );
    }

    #[test]
    fn test_choices_on_fill_in_rejected() {
        let mut question = Question::fill_in_blank(8, "?", "x", "");
        question.choices = vec!["x".to_string(), "y".to_string()];
        assert_eq!(
            question.validate(),
            Err(QuestionError::UnexpectedChoices { id: 8 })
        );
    }

    #[test]
    fn test_answer_deserializes_untagged() {
        let question: Question = serde_json::from_str(
            r#"{"id":3,"kind":"true_false","prompt":"p","correct_answer":true,"explanation":"e"}"#,
        )
        .unwrap();
        assert_eq!(question.correct_answer, Answer::Bool(true));
        assert!(question.choices.is_empty());

        let question: Question = serde_json::from_str(
            r#"{"id":2,"kind":"fill_in_blank","prompt":"p","correct_answer":"leaves","explanation":"e"}"#,
        )
        .unwrap();
        assert_eq!(question.correct_answer, Answer::text("leaves"));
    }

    #[test]
    fn test_answer_display() {
        assert_eq!(Answer::Bool(true).to_string(), "True");
        assert_eq!(Answer::text("leaves").to_string(), "leaves");
    }
}
