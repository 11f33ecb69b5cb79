use pdf_tutor::{
    sample_deck, Answer, CompletionReason, GradingPolicy, JsonDeck, Question, QuestionKind,
    QuestionSource, Quiz, QuizConfig, QuizError, QuizSession, SessionError, SessionStatus,
};

fn sample_session() -> QuizSession {
    QuizSession::new(sample_deck().questions, 600, GradingPolicy::Exact).unwrap()
}

fn correct_answers() -> Vec<Answer> {
    sample_deck()
        .questions
        .into_iter()
        .map(|q| q.correct_answer)
        .collect()
}

fn assert_score_bounds(session: &QuizSession) {
    let score = session.score();
    assert!(score.correct <= score.total);
    assert_eq!(score.total, session.total_questions());
}

#[test]
fn all_correct_scores_full_marks() {
    let mut session = sample_session();

    for answer in correct_answers() {
        session.submit_answer(answer).unwrap();
        assert_score_bounds(&session);
        session.advance().unwrap();
    }

    assert_eq!(session.status(), SessionStatus::Complete);
    let score = session.score();
    assert_eq!((score.correct, score.total), (5, 5));
    assert_eq!(score.percentage(), 100);

    let outcome = session.outcome().unwrap();
    assert_eq!(outcome.reason, CompletionReason::Finished);
    assert_eq!(outcome.elapsed_seconds, 0);
}

#[test]
fn fill_in_is_case_sensitive_by_default() {
    let mut session = sample_session();
    session.submit_answer(Answer::text("Photosynthesis")).unwrap();
    session.advance().unwrap();

    let view = session.current();
    assert_eq!(view.id, 2);
    assert_eq!(view.kind, QuestionKind::FillInBlank);

    session.submit_answer(Answer::text("Chlorophyll")).unwrap();
    let feedback = session.current().feedback.unwrap();
    assert!(!feedback.is_correct);
    assert_eq!(session.score().correct, 1);
}

#[test]
fn lenient_grading_accepts_case_and_whitespace() {
    let mut session =
        QuizSession::new(sample_deck().questions, 600, GradingPolicy::Lenient).unwrap();
    session.submit_answer(Answer::text("Photosynthesis")).unwrap();
    session.advance().unwrap();
    session.submit_answer(Answer::text(" Chlorophyll ")).unwrap();
    assert!(session.current().feedback.unwrap().is_correct);
}

#[test]
fn timeout_without_answers_scores_zero() {
    let mut session = sample_session();

    for _ in 0..599 {
        assert_eq!(session.tick(), SessionStatus::Active);
    }
    assert_eq!(session.tick(), SessionStatus::Complete);

    let score = session.score();
    assert_eq!((score.correct, score.total), (0, 5));
    let outcome = session.outcome().unwrap();
    assert_eq!(outcome.reason, CompletionReason::TimeExpired);
    assert_eq!(outcome.elapsed_seconds, 600);
}

#[test]
fn retreat_resets_reveal_and_allows_overwrite() {
    let mut session = sample_session();
    session.submit_answer(Answer::text("Respiration")).unwrap();
    session.advance().unwrap();
    session.submit_answer(Answer::text("chlorophyll")).unwrap();
    session.advance().unwrap();
    assert_eq!(session.current_index(), 2);

    assert_eq!(session.retreat(), Ok(true));
    assert_eq!(session.current_index(), 1);
    assert!(!session.is_revealed());
    assert!(session.current().feedback.is_none());

    session.submit_answer(Answer::text("stroma")).unwrap();
    assert_eq!(session.answer_for(2), Some(&Answer::text("stroma")));
    assert_eq!(session.score().correct, 0);
}

#[test]
fn remaining_time_never_increases_or_goes_negative() {
    let mut session = QuizSession::new(sample_deck().questions, 5, GradingPolicy::Exact).unwrap();
    let mut previous = session.remaining_seconds();

    for _ in 0..20 {
        session.tick();
        let now = session.remaining_seconds();
        assert!(now <= previous);
        previous = now;
    }
    assert_eq!(session.remaining_seconds(), 0);
}

#[test]
fn last_second_completes_and_freezes() {
    let mut session = QuizSession::new(sample_deck().questions, 2, GradingPolicy::Exact).unwrap();
    session.submit_answer(Answer::text("Photosynthesis")).unwrap();
    session.tick();
    assert_eq!(session.remaining_seconds(), 1);

    assert_eq!(session.tick(), SessionStatus::Complete);
    assert_eq!(session.remaining_seconds(), 0);

    let before = (session.current_index(), session.score(), session.outcome());
    for _ in 0..3 {
        session.tick();
    }
    assert_eq!(session.advance(), Err(SessionError::SessionComplete));
    assert_eq!(
        (session.current_index(), session.score(), session.outcome()),
        before
    );
}

#[test]
fn score_is_idempotent() {
    let mut session = sample_session();
    session.submit_answer(Answer::text("Photosynthesis")).unwrap();
    assert_eq!(session.score(), session.score());
}

#[test]
fn rejected_actions_do_not_change_state() {
    let mut session = sample_session();
    session.submit_answer(Answer::text("Digestion")).unwrap();

    let before = (
        session.current_index(),
        session.is_revealed(),
        session.answer_for(1).cloned(),
    );
    assert_eq!(
        session.submit_answer(Answer::text("Photosynthesis")),
        Err(SessionError::AlreadyAnswered(1))
    );
    assert_eq!(
        (
            session.current_index(),
            session.is_revealed(),
            session.answer_for(1).cloned()
        ),
        before
    );
}

#[test]
fn true_false_takes_booleans() {
    let mut session = sample_session();
    for answer in correct_answers().into_iter().take(2) {
        session.submit_answer(answer).unwrap();
        session.advance().unwrap();
    }

    assert_eq!(
        session.submit_answer(Answer::text("true")),
        Err(SessionError::AnswerKindMismatch(QuestionKind::TrueFalse))
    );
    session.submit_answer(Answer::Bool(true)).unwrap();
    assert_eq!(session.score().correct, 3);
}

#[test]
fn malformed_deck_fails_fast() {
    let questions = vec![
        Question::true_false(1, "Ok", true, ""),
        Question::multiple_choice(2, "Broken", &["Only"], "Only", ""),
    ];
    assert!(matches!(
        QuizSession::new(questions, 600, GradingPolicy::Exact),
        Err(SessionError::Malformed(_))
    ));
}

#[test]
fn quiz_rejects_zero_time_limit() {
    let config = QuizConfig {
        time_limit_secs: 0,
        ..QuizConfig::default()
    };
    assert!(matches!(Quiz::new(config), Err(QuizError::Config(_))));
}

#[test]
fn bundled_deck_loads_and_plays() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("decks/cells.json");
    let deck = JsonDeck::new(path).load().unwrap();
    assert_eq!(deck.title, "Cell Biology");

    let mut session = QuizSession::new(deck.questions, 600, GradingPolicy::Exact).unwrap();
    session.submit_answer(Answer::text("Mitochondrion")).unwrap();
    session.advance().unwrap();
    session.submit_answer(Answer::text("membrane")).unwrap();
    session.advance().unwrap();
    session.submit_answer(Answer::Bool(true)).unwrap();
    session.advance().unwrap();

    let outcome = session.outcome().unwrap();
    assert_eq!((outcome.correct, outcome.total, outcome.percentage), (2, 3, 67));
}

#[test]
fn answers_stay_hidden_until_revealed() {
    let mut session = sample_session();
    assert!(session.current().feedback.is_none());
    assert!(session.questions().is_none());

    session.submit_answer(Answer::text("Respiration")).unwrap();
    let feedback = session.current().feedback.unwrap();
    assert_eq!(feedback.correct_answer, &Answer::text("Photosynthesis"));

    session.advance().unwrap();
    assert!(session.current().feedback.is_none());
    assert!(session.questions().is_none());
}

#[test]
fn session_needs_time_on_the_clock() {
    assert!(matches!(
        QuizSession::new(sample_deck().questions, 0, GradingPolicy::Exact),
        Err(SessionError::ZeroTimeLimit)
    ));
}
