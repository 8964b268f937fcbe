//! Fixed exam parameters.

use std::time::Duration;

/// Questions requested per session.
pub const TOTAL_QUESTIONS: usize = 50;
/// Session length in seconds (60 minutes).
pub const SESSION_DURATION_SECS: u32 = 60 * 60;
/// Marks per correct answer, in hundredths.
pub const CORRECT_HUNDREDTHS: i64 = 200;
/// Marks deducted per wrong answer, in hundredths.
pub const WRONG_PENALTY_HUNDREDTHS: i64 = 66;
#[allow(clippy::cast_precision_loss)]
pub const MARKS_PER_CORRECT: f64 = CORRECT_HUNDREDTHS as f64 / 100.0;
#[allow(clippy::cast_precision_loss)]
pub const NEGATIVE_MARKING: f64 = WRONG_PENALTY_HUNDREDTHS as f64 / 100.0;
/// Countdown resolution.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Marks awarded and deducted per question, stored in hundredths so that
/// scores add up exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkingScheme {
    correct_hundredths: i64,
    wrong_penalty_hundredths: i64,
}

impl MarkingScheme {
    #[must_use]
    pub const fn new(correct_hundredths: i64, wrong_penalty_hundredths: i64) -> Self {
        Self {
            correct_hundredths,
            wrong_penalty_hundredths,
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn marks_per_correct(&self) -> f64 {
        self.correct_hundredths as f64 / 100.0
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn negative_marking(&self) -> f64 {
        self.wrong_penalty_hundredths as f64 / 100.0
    }

    /// Net marks in hundredths. Unbounded in both directions.
    #[must_use]
    pub fn score_hundredths(&self, correct: u32, wrong: u32) -> i64 {
        i64::from(correct) * self.correct_hundredths
            - i64::from(wrong) * self.wrong_penalty_hundredths
    }
}

impl Default for MarkingScheme {
    fn default() -> Self {
        Self::new(CORRECT_HUNDREDTHS, WRONG_PENALTY_HUNDREDTHS)
    }
}

/// Parameters of one exam session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamConfig {
    question_count: usize,
    duration_secs: u32,
    marking: MarkingScheme,
    tick: Duration,
}

impl ExamConfig {
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn marking(&self) -> MarkingScheme {
        self.marking
    }

    #[must_use]
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Override the session length. Clamped to at least one second.
    #[must_use]
    pub fn with_duration_secs(mut self, secs: u32) -> Self {
        self.duration_secs = secs.max(1);
        self
    }

    /// Override the number of requested questions. Clamped to at least one.
    #[must_use]
    pub fn with_question_count(mut self, count: usize) -> Self {
        self.question_count = count.max(1);
        self
    }

    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        if !tick.is_zero() {
            self.tick = tick;
        }
        self
    }

    /// Rules shown on the instructions screen.
    #[must_use]
    pub fn instructions(&self) -> Vec<String> {
        let minutes = self.duration_secs / 60;
        vec![
            format!("Total Duration: {minutes} Minutes."),
            format!(
                "Total Questions: {}. All questions are compulsory.",
                self.question_count
            ),
            format!(
                "Each question carries {} marks.",
                trim_marks(self.marking.marks_per_correct())
            ),
            format!(
                "Negative Marking: {} marks will be deducted for each incorrect answer.",
                trim_marks(self.marking.negative_marking())
            ),
            "No calculator or electronic gadgets allowed.".to_string(),
            "Ensure a stable internet connection for real-time question generation.".to_string(),
            "Auto-submit will be triggered when the timer reaches zero.".to_string(),
            "You can mark questions for review and revisit them later using the side palette."
                .to_string(),
        ]
    }
}

impl Default for ExamConfig {
    fn default() -> Self {
        Self {
            question_count: TOTAL_QUESTIONS,
            duration_secs: SESSION_DURATION_SECS,
            marking: MarkingScheme::default(),
            tick: TICK_INTERVAL,
        }
    }
}

fn trim_marks(value: f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
