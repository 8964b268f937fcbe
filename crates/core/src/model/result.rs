/// Scored snapshot of a submitted session.
///
/// Every field is fixed at submission time. The narrative `analysis` is the
/// only part filled in afterwards, and attaching it leaves the counts alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamResult {
    total_questions: u32,
    answered: u32,
    correct: u32,
    wrong: u32,
    unattempted: u32,
    score_hundredths: i64,
    accuracy: f64,
    time_taken_secs: u32,
    analysis: Option<String>,
}

impl ExamResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        total_questions: u32,
        answered: u32,
        correct: u32,
        wrong: u32,
        score_hundredths: i64,
        accuracy: f64,
        time_taken_secs: u32,
    ) -> Self {
        Self {
            total_questions,
            answered,
            correct,
            wrong,
            unattempted: total_questions.saturating_sub(answered),
            score_hundredths,
            accuracy,
            time_taken_secs,
            analysis: None,
        }
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    #[must_use]
    pub fn unattempted(&self) -> u32 {
        self.unattempted
    }

    /// Net marks. May be negative.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score(&self) -> f64 {
        self.score_hundredths as f64 / 100.0
    }

    /// Net marks in hundredths, free of float rounding.
    #[must_use]
    pub fn score_hundredths(&self) -> i64 {
        self.score_hundredths
    }

    /// Percentage of answered questions that were correct; zero when nothing was answered.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    #[must_use]
    pub fn time_taken_secs(&self) -> u32 {
        self.time_taken_secs
    }

    #[must_use]
    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    pub(crate) fn set_analysis(&mut self, analysis: String) {
        self.analysis = Some(analysis);
    }
}
