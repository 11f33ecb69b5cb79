use std::collections::HashMap;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{validate_questions, Answer, Question, QuestionKind};

use super::error::SessionError;
use super::grading::GradingPolicy;
use super::outcome::{CompletionReason, Score, SessionOutcome, SessionStatus};

/// Feedback shown once the current question has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub is_correct: bool,
    pub correct_answer: &'a Answer,
    pub explanation: &'a str,
}

/// Read-only projection of the current question for rendering.
///
/// The correct answer and explanation stay hidden until the question is
/// answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionView<'a> {
    pub id: u32,
    pub number: usize,
    pub total: usize,
    pub kind: QuestionKind,
    pub prompt: &'a str,
    pub choices: &'a [String],
    pub submitted: Option<&'a Answer>,
    pub feedback: Option<Feedback<'a>>,
}

/// A single timed quiz run over a fixed list of questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    questions: Vec<Question>,
    current_index: usize,
    answers: HashMap<u32, Answer>,
    revealed: bool,
    time_limit: u32,
    remaining_seconds: u32,
    status: SessionStatus,
    reason: Option<CompletionReason>,
    grading: GradingPolicy,
}

impl QuizSession {
    /// Start a session. Questions are validated up front and ordered by id.
    pub fn new(
        mut questions: Vec<Question>,
        time_limit: u32,
        grading: GradingPolicy,
    ) -> Result<Self, SessionError> {
        if time_limit == 0 {
            return Err(SessionError::ZeroTimeLimit);
        }
        validate_questions(&questions)?;
        questions.sort_by_key(|q| q.id);

        let session = Self {
            id: Uuid::new_v4(),
            questions,
            current_index: 0,
            answers: HashMap::new(),
            revealed: false,
            time_limit,
            remaining_seconds: time_limit,
            status: SessionStatus::Active,
            reason: None,
            grading,
        };

        info!(
            session = %session.id,
            questions = session.questions.len(),
            time_limit,
            "quiz session started"
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.reason
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.time_limit - self.remaining_seconds
    }

    pub fn grading(&self) -> GradingPolicy {
        self.grading
    }

    /// The full question list, answers included, once the session is over.
    pub fn questions(&self) -> Option<&[Question]> {
        match self.status {
            SessionStatus::Complete => Some(&self.questions),
            SessionStatus::Active => None,
        }
    }

    pub fn answer_for(&self, question_id: u32) -> Option<&Answer> {
        self.answers.get(&question_id)
    }

    pub(crate) fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    /// Whether the recorded answer for `question` is graded correct.
    pub fn is_correct(&self, question: &Question) -> bool {
        self.answers
            .get(&question.id)
            .is_some_and(|answer| self.grading.is_correct(question, answer))
    }

    pub fn current(&self) -> QuestionView<'_> {
        let question = self.current_question();
        let submitted = self.answers.get(&question.id);
        let feedback = if self.revealed {
            Some(Feedback {
                is_correct: self.is_correct(question),
                correct_answer: &question.correct_answer,
                explanation: &question.explanation,
            })
        } else {
            None
        };

        QuestionView {
            id: question.id,
            number: self.current_index + 1,
            total: self.questions.len(),
            kind: question.kind,
            prompt: &question.prompt,
            choices: &question.choices,
            submitted,
            feedback,
        }
    }

    /// Record an answer for the current question and reveal its feedback.
    pub fn submit_answer(&mut self, answer: Answer) -> Result<(), SessionError> {
        self.ensure_active()?;

        let question = &self.questions[self.current_index];
        if self.revealed {
            warn!(question = question.id, "answer rejected: already revealed");
            return Err(SessionError::AlreadyAnswered(question.id));
        }
        if !question.kind.accepts(&answer) {
            return Err(SessionError::AnswerKindMismatch(question.kind));
        }
        if question.kind == QuestionKind::MultipleChoice {
            if let Answer::Text(choice) = &answer {
                if !question.choices.contains(choice) {
                    return Err(SessionError::UnknownChoice(choice.clone()));
                }
            }
        }

        let id = question.id;
        debug!(question = id, answer = %answer, "answer submitted");
        self.answers.insert(id, answer);
        self.revealed = true;
        Ok(())
    }

    /// Move to the next question, or complete the session after the last.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        self.ensure_active()?;

        if !self.revealed {
            let id = self.current_question().id;
            warn!(question = id, "advance rejected: not answered");
            return Err(SessionError::NotRevealed(id));
        }

        if self.is_last_question() {
            self.complete(CompletionReason::Finished);
        } else {
            self.current_index += 1;
            self.revealed = false;
            debug!(index = self.current_index, "advanced");
        }
        Ok(())
    }

    /// Step back one question. Returns `Ok(false)` when already at the first.
    pub fn retreat(&mut self) -> Result<bool, SessionError> {
        self.ensure_active()?;

        if self.current_index == 0 {
            return Ok(false);
        }
        self.current_index -= 1;
        self.revealed = false;
        debug!(index = self.current_index, "retreated");
        Ok(true)
    }

    /// One second elapsed. Completes the session when time runs out.
    pub fn tick(&mut self) -> SessionStatus {
        if self.status == SessionStatus::Complete {
            return self.status;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.complete(CompletionReason::TimeExpired);
        }
        self.status
    }

    pub fn score(&self) -> Score {
        let correct = self.questions.iter().filter(|q| self.is_correct(q)).count();
        Score {
            correct,
            total: self.questions.len(),
        }
    }

    /// Final results, available once the session is complete.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        let reason = self.reason?;
        let score = self.score();
        Some(SessionOutcome {
            correct: score.correct,
            total: score.total,
            percentage: score.percentage(),
            elapsed_seconds: self.elapsed_seconds(),
            time_limit_seconds: self.time_limit,
            reason,
        })
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Active => Ok(()),
            SessionStatus::Complete => Err(SessionError::SessionComplete),
        }
    }

    fn complete(&mut self, reason: CompletionReason) {
        self.status = SessionStatus::Complete;
        self.reason = Some(reason);
        let score = self.score();
        info!(
            session = %self.id,
            ?reason,
            correct = score.correct,
            total = score.total,
            elapsed = self.elapsed_seconds(),
            "quiz session complete"
        );
    }
}
