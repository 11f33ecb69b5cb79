//! In-memory record of completed quizzes for the progress screen.
//!
//! Nothing here outlives the process.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::session::{CompletionReason, SessionOutcome};

/// One completed quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEntry {
    pub subject: String,
    pub outcome: SessionOutcome,
    pub completed_at: DateTime<Utc>,
}

impl ProgressEntry {
    pub fn new(subject: impl Into<String>, outcome: SessionOutcome) -> Self {
        Self {
            subject: subject.into(),
            outcome,
            completed_at: Utc::now(),
        }
    }
}

/// Consumer of completed session outcomes.
pub trait ProgressStore {
    fn record(&mut self, entry: ProgressEntry);

    /// Entries in the order they were recorded.
    fn entries(&self) -> &[ProgressEntry];

    fn summary(&self) -> ProgressSummary {
        ProgressSummary::from_entries(self.entries())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProgress {
    entries: Vec<ProgressEntry>,
}

impl InMemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for InMemoryProgress {
    fn record(&mut self, entry: ProgressEntry) {
        info!(
            subject = %entry.subject,
            percentage = entry.outcome.percentage,
            "progress recorded"
        );
        self.entries.push(entry);
    }

    fn entries(&self) -> &[ProgressEntry] {
        &self.entries
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Achievement {
    FirstQuiz,
    PerfectScore,
    QuickThinker,
}

impl Achievement {
    pub const ALL: [Achievement; 3] = [
        Achievement::FirstQuiz,
        Achievement::PerfectScore,
        Achievement::QuickThinker,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Achievement::FirstQuiz => "First Quiz",
            Achievement::PerfectScore => "Perfect Score",
            Achievement::QuickThinker => "Quick Thinker",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::FirstQuiz => "Completed your first quiz",
            Achievement::PerfectScore => "Scored 100% on a quiz",
            Achievement::QuickThinker => "Perfect score in under half the time",
        }
    }

    fn unlocked_by(self, outcome: &SessionOutcome) -> bool {
        match self {
            Achievement::FirstQuiz => true,
            Achievement::PerfectScore => outcome.correct == outcome.total,
            Achievement::QuickThinker => {
                outcome.reason == CompletionReason::Finished
                    && outcome.correct == outcome.total
                    && outcome.elapsed_seconds * 2 < outcome.time_limit_seconds
            }
        }
    }
}

/// Aggregate numbers for the progress screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressSummary {
    pub quizzes_taken: usize,
    pub average_percentage: u32,
    pub best_percentage: u32,
    pub total_seconds: u64,
    pub achievements: Vec<Achievement>,
}

impl ProgressSummary {
    pub fn from_entries(entries: &[ProgressEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let count = entries.len() as u64;
        let sum: u64 = entries.iter().map(|e| u64::from(e.outcome.percentage)).sum();
        let average_percentage = ((2 * sum + count) / (2 * count)) as u32;
        let best_percentage = entries
            .iter()
            .map(|e| e.outcome.percentage)
            .max()
            .unwrap_or(0);
        let total_seconds = entries
            .iter()
            .map(|e| u64::from(e.outcome.elapsed_seconds))
            .sum();
        let achievements = Achievement::ALL
            .into_iter()
            .filter(|a| entries.iter().any(|e| a.unlocked_by(&e.outcome)))
            .collect();

        Self {
            quizzes_taken: entries.len(),
            average_percentage,
            best_percentage,
            total_seconds,
            achievements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(
        correct: usize,
        total: usize,
        elapsed: u32,
        reason: CompletionReason,
    ) -> SessionOutcome {
        SessionOutcome {
            correct,
            total,
            percentage: crate::session::Score { correct, total }.percentage(),
            elapsed_seconds: elapsed,
            time_limit_seconds: 600,
            reason,
        }
    }

    #[test]
    fn test_empty_summary() {
        let store = InMemoryProgress::new();
        assert_eq!(store.summary(), ProgressSummary::default());
    }

    #[test]
    fn test_summary_math() {
        let mut store = InMemoryProgress::new();
        store.record(ProgressEntry::new("A", outcome(4, 5, 200, CompletionReason::Finished)));
        store.record(ProgressEntry::new("B", outcome(2, 3, 100, CompletionReason::Finished)));

        let summary = store.summary();
        assert_eq!(summary.quizzes_taken, 2);
        // (80 + 67) / 2 = 73.5
        assert_eq!(summary.average_percentage, 74);
        assert_eq!(summary.best_percentage, 80);
        assert_eq!(summary.total_seconds, 300);
        assert_eq!(summary.achievements, vec![Achievement::FirstQuiz]);
        assert_eq!(store.entries()[1].subject, "B");
    }

    #[test]
    fn test_perfect_and_quick() {
        let slow = ProgressSummary::from_entries(&[ProgressEntry::new(
            "A",
            outcome(5, 5, 400, CompletionReason::Finished),
        )]);
        assert_eq!(
            slow.achievements,
            vec![Achievement::FirstQuiz, Achievement::PerfectScore]
        );

        let quick = ProgressSummary::from_entries(&[ProgressEntry::new(
            "A",
            outcome(5, 5, 120, CompletionReason::Finished),
        )]);
        assert!(quick.achievements.contains(&Achievement::QuickThinker));
    }
}
