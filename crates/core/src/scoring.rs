//! Result computation for a submitted session.

use crate::config::MarkingScheme;
use crate::model::{ExamResult, ProgressMap, Question};

/// Raw answer counts, before marks are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub answered: u32,
    pub correct: u32,
    pub wrong: u32,
}

/// Count answered, correct and wrong questions in session order.
#[must_use]
pub fn tally(questions: &[Question], progress: &ProgressMap) -> Tally {
    let mut tally = Tally::default();
    for question in questions {
        let Some(selected) = progress.selected_for(question.id()) else {
            continue;
        };
        tally.answered = tally.answered.saturating_add(1);
        if question.is_correct(selected) {
            tally.correct = tally.correct.saturating_add(1);
        } else {
            tally.wrong = tally.wrong.saturating_add(1);
        }
    }
    tally
}

/// Percentage of answered questions that were correct.
#[must_use]
pub fn accuracy(correct: u32, answered: u32) -> f64 {
    if answered == 0 {
        return 0.0;
    }
    f64::from(correct) / f64::from(answered) * 100.0
}

/// Build the result snapshot from the final progress map.
#[must_use]
pub fn score_session(
    questions: &[Question],
    progress: &ProgressMap,
    marking: MarkingScheme,
    duration_secs: u32,
    time_left: u32,
) -> ExamResult {
    let Tally {
        answered,
        correct,
        wrong,
    } = tally(questions, progress);
    let total = u32::try_from(questions.len()).unwrap_or(u32::MAX);

    ExamResult::new(
        total,
        answered,
        correct,
        wrong,
        marking.score_hundredths(correct, wrong),
        accuracy(correct, answered),
        duration_secs.saturating_sub(time_left),
    )
}
