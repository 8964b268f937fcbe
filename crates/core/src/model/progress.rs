use std::collections::BTreeMap;

use crate::model::ids::QuestionId;
use crate::model::question::{OptionKey, Question};

/// Review state of a single question, as shown in the palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QuestionStatus {
    #[default]
    Unvisited,
    Answered,
    /// Response was cleared after being visited.
    NotAnswered,
    MarkedForReview,
}

impl QuestionStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuestionStatus::Unvisited => "Not Visited",
            QuestionStatus::Answered => "Answered",
            QuestionStatus::NotAnswered => "Not Answered",
            QuestionStatus::MarkedForReview => "Marked for Review",
        }
    }
}

/// The user's selection and review status for one question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserProgress {
    selected_option: Option<OptionKey>,
    status: QuestionStatus,
}

impl UserProgress {
    #[must_use]
    pub fn selected_option(&self) -> Option<OptionKey> {
        self.selected_option
    }

    #[must_use]
    pub fn status(&self) -> QuestionStatus {
        self.status
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.selected_option.is_some()
    }

    pub(crate) fn select(&mut self, key: OptionKey) {
        self.selected_option = Some(key);
        self.status = QuestionStatus::Answered;
    }

    pub(crate) fn clear(&mut self) {
        self.selected_option = None;
        self.status = QuestionStatus::NotAnswered;
    }

    pub(crate) fn mark_for_review(&mut self) {
        self.status = QuestionStatus::MarkedForReview;
    }
}

/// Per-status totals, used by the palette legend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub unvisited: usize,
    pub answered: usize,
    pub not_answered: usize,
    pub marked_for_review: usize,
}

/// One `UserProgress` per loaded question, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressMap {
    entries: BTreeMap<QuestionId, UserProgress>,
}

impl ProgressMap {
    /// Fresh map with every question unvisited and unselected.
    #[must_use]
    pub fn for_questions(questions: &[Question]) -> Self {
        let entries = questions
            .iter()
            .map(|question| (question.id(), UserProgress::default()))
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&UserProgress> {
        self.entries.get(&id)
    }

    /// Status for `id`, treating unknown ids as unvisited.
    #[must_use]
    pub fn status_of(&self, id: QuestionId) -> QuestionStatus {
        self.get(id).map_or(QuestionStatus::Unvisited, UserProgress::status)
    }

    #[must_use]
    pub fn selected_for(&self, id: QuestionId) -> Option<OptionKey> {
        self.get(id).and_then(UserProgress::selected_option)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &UserProgress)> {
        self.entries.iter().map(|(id, progress)| (*id, progress))
    }

    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for progress in self.entries.values() {
            match progress.status() {
                QuestionStatus::Unvisited => counts.unvisited += 1,
                QuestionStatus::Answered => counts.answered += 1,
                QuestionStatus::NotAnswered => counts.not_answered += 1,
                QuestionStatus::MarkedForReview => counts.marked_for_review += 1,
            }
        }
        counts
    }

    pub(crate) fn get_mut(&mut self, id: QuestionId) -> Option<&mut UserProgress> {
        self.entries.get_mut(&id)
    }
}
