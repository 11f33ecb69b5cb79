/// Default time budget for a quiz, in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 600;

/// Whether a session is still accepting actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Complete,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// The user advanced past the last question.
    Finished,
    /// The countdown reached zero.
    TimeExpired,
}

/// Number of correct answers out of the question count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// `round(100 * correct / total)`, halves rounding up.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((200 * self.correct + self.total) / (2 * self.total)) as u32
    }
}

/// Final numbers handed to the progress store once a session completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub elapsed_seconds: u32,
    pub time_limit_seconds: u32,
    pub reason: CompletionReason,
}

/// Format seconds as `M:SS` for the countdown display.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
