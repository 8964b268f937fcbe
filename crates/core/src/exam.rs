//! Exam session state machine.
//!
//! `ExamSession` is an owned value; every transition borrows the current
//! session and returns the next one, leaving the original untouched on error.
//! Questions are shared behind an `Arc`, so a transition only copies the
//! progress map.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::ExamConfig;
use crate::model::{
    ExamResult, OptionKey, ProgressMap, Question, QuestionId, SessionEpoch, Subject,
    UserProgress,
};
use crate::scoring::score_session;

//
// ─── STATUS & ERRORS ──────────────────────────────────────────────────────────
//

/// Lifecycle of one session: `Idle → Instructions → Ongoing → Submitted → Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExamStatus {
    #[default]
    Idle,
    Instructions,
    Ongoing,
    Submitted,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamError {
    #[error("expected {expected:?} state, session is {actual:?}")]
    InvalidState {
        expected: ExamStatus,
        actual: ExamStatus,
    },

    #[error("no questions were provided")]
    NoQuestions,

    #[error("duplicate question id {0}")]
    DuplicateQuestion(QuestionId),

    #[error("session already submitted")]
    AlreadySubmitted,

    #[error("analysis does not belong to the current session")]
    StaleAnalysis,
}

//
// ─── INTENTS ──────────────────────────────────────────────────────────────────
//

/// A user command, as dispatched by the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamIntent {
    SelectSubject(Subject),
    Start,
    SelectOption(OptionKey),
    MarkForReview,
    ClearResponse,
    Next,
    Previous,
    GoTo(usize),
    Submit,
    Restart,
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

#[derive(Clone)]
pub struct ExamSession {
    epoch: SessionEpoch,
    config: ExamConfig,
    status: ExamStatus,
    subject: Subject,
    questions: Arc<[Question]>,
    progress: ProgressMap,
    current_index: usize,
    time_left: u32,
    result: Option<ExamResult>,
    load_error: Option<String>,
    started_at: Option<DateTime<Utc>>,
    submitted_at: Option<DateTime<Utc>>,
}

impl ExamSession {
    /// Empty session in `Idle`, with the default subject selected.
    #[must_use]
    pub fn new(config: ExamConfig) -> Self {
        Self::idle(config, SessionEpoch::default(), Subject::default())
    }

    fn idle(config: ExamConfig, epoch: SessionEpoch, subject: Subject) -> Self {
        let time_left = config.duration_secs();
        Self {
            epoch,
            config,
            status: ExamStatus::Idle,
            subject,
            questions: Arc::from(Vec::new()),
            progress: ProgressMap::default(),
            current_index: 0,
            time_left,
            result: None,
            load_error: None,
            started_at: None,
            submitted_at: None,
        }
    }

    #[must_use]
    pub fn epoch(&self) -> SessionEpoch {
        self.epoch
    }

    #[must_use]
    pub fn config(&self) -> &ExamConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> ExamStatus {
        self.status
    }

    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn current_progress(&self) -> Option<&UserProgress> {
        self.current_question()
            .and_then(|question| self.progress.get(question.id()))
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Seconds remaining on the countdown.
    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    #[must_use]
    pub fn result(&self) -> Option<&ExamResult> {
        self.result.as_ref()
    }

    /// Message from the last failed question load, shown while `Idle`.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.submitted_at
    }

    fn ensure(&self, expected: ExamStatus) -> Result<(), ExamError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(ExamError::InvalidState {
                expected,
                actual: self.status,
            })
        }
    }

    //
    // ─── IDLE ────────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `ExamError::InvalidState` outside `Idle`.
    pub fn select_subject(&self, subject: Subject) -> Result<Self, ExamError> {
        self.ensure(ExamStatus::Idle)?;
        let mut next = self.clone();
        next.subject = subject;
        Ok(next)
    }

    /// Keep the session in `Idle` and surface a load failure message.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InvalidState` outside `Idle`.
    pub fn record_load_failure(&self, message: impl Into<String>) -> Result<Self, ExamError> {
        self.ensure(ExamStatus::Idle)?;
        let mut next = self.clone();
        next.load_error = Some(message.into());
        Ok(next)
    }

    /// Install a freshly generated question set and move to `Instructions`.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::NoQuestions` for an empty list,
    /// `ExamError::DuplicateQuestion` when two questions share an id, and
    /// `ExamError::InvalidState` outside `Idle`. The session is unchanged in
    /// every error case.
    pub fn load_questions(&self, questions: Vec<Question>) -> Result<Self, ExamError> {
        self.ensure(ExamStatus::Idle)?;
        if questions.is_empty() {
            return Err(ExamError::NoQuestions);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(ExamError::DuplicateQuestion(question.id()));
            }
        }

        let mut next = self.clone();
        next.progress = ProgressMap::for_questions(&questions);
        next.questions = Arc::from(questions);
        next.current_index = 0;
        next.load_error = None;
        next.status = ExamStatus::Instructions;
        Ok(next)
    }

    //
    // ─── INSTRUCTIONS ────────────────────────────────────────────────────────
    //

    /// Begin the timed attempt.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InvalidState` outside `Instructions`.
    pub fn start(&self, now: DateTime<Utc>) -> Result<Self, ExamError> {
        self.ensure(ExamStatus::Instructions)?;
        let mut next = self.clone();
        next.time_left = self.config.duration_secs();
        next.current_index = 0;
        next.started_at = Some(now);
        next.status = ExamStatus::Ongoing;
        Ok(next)
    }

    //
    // ─── ONGOING ─────────────────────────────────────────────────────────────
    //

    fn update_current(&self, apply: impl FnOnce(&mut UserProgress)) -> Result<Self, ExamError> {
        self.ensure(ExamStatus::Ongoing)?;
        let mut next = self.clone();
        if let Some(id) = self.current_question().map(Question::id) {
            if let Some(progress) = next.progress.get_mut(id) {
                apply(progress);
            }
        }
        Ok(next)
    }

    /// Select (or overwrite) the answer to the current question.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InvalidState` outside `Ongoing`.
    pub fn select_option(&self, key: OptionKey) -> Result<Self, ExamError> {
        self.update_current(|progress| progress.select(key))
    }

    /// Flag the current question and move on to the next one, if any.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InvalidState` outside `Ongoing`.
    pub fn mark_for_review(&self) -> Result<Self, ExamError> {
        self.update_current(UserProgress::mark_for_review)?.next()
    }

    /// # Errors
    ///
    /// Returns `ExamError::InvalidState` outside `Ongoing`.
    pub fn clear_response(&self) -> Result<Self, ExamError> {
        self.update_current(UserProgress::clear)
    }

    /// # Errors
    ///
    /// Returns `ExamError::InvalidState` outside `Ongoing`.
    pub fn next(&self) -> Result<Self, ExamError> {
        self.go_to(self.current_index.saturating_add(1))
    }

    /// # Errors
    ///
    /// Returns `ExamError::InvalidState` outside `Ongoing`.
    pub fn previous(&self) -> Result<Self, ExamError> {
        match self.current_index.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => {
                self.ensure(ExamStatus::Ongoing)?;
                Ok(self.clone())
            }
        }
    }

    /// Jump to `index`. Out-of-range targets leave the index unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InvalidState` outside `Ongoing`.
    pub fn go_to(&self, index: usize) -> Result<Self, ExamError> {
        self.ensure(ExamStatus::Ongoing)?;
        let mut next = self.clone();
        if index < self.questions.len() {
            next.current_index = index;
        }
        Ok(next)
    }

    /// Advance the countdown by one tick. Reaching zero submits.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InvalidState` outside `Ongoing`.
    pub fn tick(&self, now: DateTime<Utc>) -> Result<Self, ExamError> {
        self.ensure(ExamStatus::Ongoing)?;
        let mut next = self.clone();
        next.time_left = self.time_left.saturating_sub(1);
        if next.time_left == 0 {
            next.finalize(now);
        }
        Ok(next)
    }

    /// Freeze the countdown and compute the result.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::AlreadySubmitted` on a repeated submit and
    /// `ExamError::InvalidState` before the attempt has started.
    pub fn submit(&self, now: DateTime<Utc>) -> Result<Self, ExamError> {
        if self.status == ExamStatus::Submitted {
            return Err(ExamError::AlreadySubmitted);
        }
        self.ensure(ExamStatus::Ongoing)?;
        let mut next = self.clone();
        next.finalize(now);
        Ok(next)
    }

    fn finalize(&mut self, now: DateTime<Utc>) {
        self.result = Some(score_session(
            &self.questions,
            &self.progress,
            self.config.marking(),
            self.config.duration_secs(),
            self.time_left,
        ));
        self.submitted_at = Some(now);
        self.status = ExamStatus::Submitted;
    }

    //
    // ─── SUBMITTED ───────────────────────────────────────────────────────────
    //

    /// Merge a narrative analysis produced for `epoch`.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::StaleAnalysis` when the session has moved on since
    /// the analysis was requested.
    pub fn attach_analysis(
        &self,
        epoch: SessionEpoch,
        analysis: impl Into<String>,
    ) -> Result<Self, ExamError> {
        if epoch != self.epoch || self.status != ExamStatus::Submitted {
            return Err(ExamError::StaleAnalysis);
        }
        let mut next = self.clone();
        if let Some(result) = next.result.as_mut() {
            result.set_analysis(analysis.into());
        }
        Ok(next)
    }

    /// Discard the attempt and return to `Idle` under a new epoch.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::InvalidState` outside `Submitted`.
    pub fn restart(&self) -> Result<Self, ExamError> {
        self.ensure(ExamStatus::Submitted)?;
        Ok(Self::idle(
            self.config.clone(),
            self.epoch.next(),
            self.subject,
        ))
    }

    /// Dispatch a user intent to its transition.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying transition.
    pub fn apply(&self, intent: ExamIntent, now: DateTime<Utc>) -> Result<Self, ExamError> {
        match intent {
            ExamIntent::SelectSubject(subject) => self.select_subject(subject),
            ExamIntent::Start => self.start(now),
            ExamIntent::SelectOption(key) => self.select_option(key),
            ExamIntent::MarkForReview => self.mark_for_review(),
            ExamIntent::ClearResponse => self.clear_response(),
            ExamIntent::Next => self.next(),
            ExamIntent::Previous => self.previous(),
            ExamIntent::GoTo(index) => self.go_to(index),
            ExamIntent::Submit => self.submit(now),
            ExamIntent::Restart => self.restart(),
        }
    }
}

impl Default for ExamSession {
    fn default() -> Self {
        Self::new(ExamConfig::default())
    }
}

impl fmt::Debug for ExamSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExamSession")
            .field("epoch", &self.epoch)
            .field("status", &self.status)
            .field("subject", &self.subject)
            .field("questions_len", &self.questions.len())
            .field("current_index", &self.current_index)
            .field("time_left", &self.time_left)
            .field("has_result", &self.result.is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, QuestionOptions, QuestionStatus};
    use crate::time::fixed_now;

    fn build_questions(n: u32) -> Vec<Question> {
        (1..=n)
            .map(|id| {
                QuestionDraft {
                    id,
                    text: format!("Q{id}"),
                    options: QuestionOptions::new("a", "b", "c", "d"),
                    correct_answer: "B".into(),
                    explanation: format!("E{id}"),
                }
                .validate(Subject::History)
                .unwrap()
            })
            .collect()
    }

    fn ongoing(n: u32) -> ExamSession {
        ExamSession::default()
            .load_questions(build_questions(n))
            .unwrap()
            .start(fixed_now())
            .unwrap()
    }

    #[test]
    fn new_session_is_idle_and_empty() {
        let session = ExamSession::default();
        assert_eq!(session.status(), ExamStatus::Idle);
        assert_eq!(session.subject(), Subject::CurrentAffairs);
        assert!(session.questions().is_empty());
        assert!(session.progress().is_empty());
        assert!(session.result().is_none());
        assert_eq!(session.time_left(), 3600);
    }

    #[test]
    fn load_initializes_one_unvisited_entry_per_question() {
        let session = ExamSession::default()
            .load_questions(build_questions(5))
            .unwrap();
        assert_eq!(session.status(), ExamStatus::Instructions);
        assert_eq!(session.progress().len(), 5);
        for (_, progress) in session.progress().iter() {
            assert_eq!(progress.status(), QuestionStatus::Unvisited);
            assert_eq!(progress.selected_option(), None);
        }
    }

    #[test]
    fn empty_load_stays_idle() {
        let session = ExamSession::default();
        let err = session.load_questions(Vec::new()).unwrap_err();
        assert_eq!(err, ExamError::NoQuestions);
        assert_eq!(session.status(), ExamStatus::Idle);
        assert!(session.progress().is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut questions = build_questions(2);
        questions.push(questions[0].clone());
        let err = ExamSession::default().load_questions(questions).unwrap_err();
        assert_eq!(err, ExamError::DuplicateQuestion(QuestionId::new(1)));
    }

    #[test]
    fn load_failure_message_is_cleared_by_successful_load() {
        let session = ExamSession::default()
            .record_load_failure("Could not load questions.")
            .unwrap();
        assert_eq!(session.status(), ExamStatus::Idle);
        assert_eq!(session.load_error(), Some("Could not load questions."));

        let loaded = session.load_questions(build_questions(1)).unwrap();
        assert_eq!(loaded.load_error(), None);
    }

    #[test]
    fn select_subject_only_while_idle() {
        let session = ExamSession::default()
            .select_subject(Subject::Economy)
            .unwrap();
        assert_eq!(session.subject(), Subject::Economy);

        let err = ongoing(1).select_subject(Subject::Polity).unwrap_err();
        assert_eq!(
            err,
            ExamError::InvalidState {
                expected: ExamStatus::Idle,
                actual: ExamStatus::Ongoing
            }
        );
    }

    #[test]
    fn start_resets_timer_and_index() {
        let session = ongoing(3);
        assert_eq!(session.status(), ExamStatus::Ongoing);
        assert_eq!(session.time_left(), 3600);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.started_at(), Some(fixed_now()));
    }

    #[test]
    fn answering_before_start_is_rejected() {
        let session = ExamSession::default()
            .load_questions(build_questions(2))
            .unwrap();
        assert!(matches!(
            session.select_option(OptionKey::A),
            Err(ExamError::InvalidState { .. })
        ));
    }

    #[test]
    fn select_clear_reselect_leaves_single_answered_entry() {
        let session = ongoing(3)
            .select_option(OptionKey::A)
            .unwrap()
            .clear_response()
            .unwrap();
        let cleared = session.current_progress().copied().unwrap();
        assert_eq!(cleared.status(), QuestionStatus::NotAnswered);
        assert_eq!(cleared.selected_option(), None);

        let session = session.select_option(OptionKey::C).unwrap();
        assert_eq!(session.progress().len(), 3);
        let progress = session.current_progress().copied().unwrap();
        assert_eq!(progress.selected_option(), Some(OptionKey::C));
        assert_eq!(progress.status(), QuestionStatus::Answered);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn mark_for_review_keeps_selection_and_advances() {
        let session = ongoing(2)
            .select_option(OptionKey::D)
            .unwrap()
            .mark_for_review()
            .unwrap();
        assert_eq!(session.current_index(), 1);
        let first = session.progress().get(QuestionId::new(1)).copied().unwrap();
        assert_eq!(first.status(), QuestionStatus::MarkedForReview);
        assert_eq!(first.selected_option(), Some(OptionKey::D));

        let last = session.mark_for_review().unwrap();
        assert_eq!(last.current_index(), 1);
        assert_eq!(
            last.progress().status_of(QuestionId::new(2)),
            QuestionStatus::MarkedForReview
        );
    }

    #[test]
    fn navigation_is_clamped() {
        let session = ongoing(3);
        assert_eq!(session.previous().unwrap().current_index(), 0);

        let last = session.go_to(2).unwrap();
        assert_eq!(last.current_index(), 2);
        assert!(last.is_last_question());
        assert_eq!(last.next().unwrap().current_index(), 2);
        assert_eq!(last.go_to(99).unwrap().current_index(), 2);
        assert_eq!(last.previous().unwrap().current_index(), 1);
    }

    #[test]
    fn tick_counts_down_and_submits_at_zero() {
        let config = ExamConfig::default().with_duration_secs(2);
        let session = ExamSession::new(config)
            .load_questions(build_questions(2))
            .unwrap()
            .start(fixed_now())
            .unwrap()
            .select_option(OptionKey::B)
            .unwrap();

        let one = session.tick(fixed_now()).unwrap();
        assert_eq!(one.time_left(), 1);
        assert_eq!(one.status(), ExamStatus::Ongoing);

        let zero = one.tick(fixed_now()).unwrap();
        assert_eq!(zero.time_left(), 0);
        assert_eq!(zero.status(), ExamStatus::Submitted);
        let result = zero.result().unwrap();
        assert_eq!(result.time_taken_secs(), 2);
        assert_eq!(result.correct(), 1);
        assert_eq!(result.unattempted(), 1);

        assert!(matches!(zero.tick(fixed_now()), Err(ExamError::InvalidState { .. })));
    }

    #[test]
    fn timeout_and_manual_submit_produce_same_result() {
        let config = ExamConfig::default().with_duration_secs(1);
        let base = ExamSession::new(config)
            .load_questions(build_questions(3))
            .unwrap()
            .start(fixed_now())
            .unwrap()
            .select_option(OptionKey::B)
            .unwrap()
            .next()
            .unwrap()
            .select_option(OptionKey::A)
            .unwrap();

        let expired = base.tick(fixed_now()).unwrap();
        let timed_out = expired.result().cloned().unwrap();

        let mut frozen = base.clone();
        frozen.time_left = 0;
        let submitted = frozen.submit(fixed_now()).unwrap();
        assert_eq!(submitted.result().cloned().unwrap(), timed_out);
    }

    #[test]
    fn double_submit_is_rejected_without_recompute() {
        let submitted = ongoing(2)
            .select_option(OptionKey::B)
            .unwrap()
            .submit(fixed_now())
            .unwrap();
        let before = submitted.result().cloned().unwrap();
        assert_eq!(
            submitted.submit(fixed_now()).unwrap_err(),
            ExamError::AlreadySubmitted
        );
        assert_eq!(submitted.result().cloned().unwrap(), before);
        assert_eq!(submitted.submitted_at(), Some(fixed_now()));
    }

    #[test]
    fn analysis_attaches_only_to_matching_epoch() {
        let submitted = ongoing(1).submit(fixed_now()).unwrap();
        let epoch = submitted.epoch();

        let analysed = submitted.attach_analysis(epoch, "Solid start.").unwrap();
        let result = analysed.result().unwrap();
        assert_eq!(result.analysis(), Some("Solid start."));
        assert_eq!(result.answered(), submitted.result().unwrap().answered());

        let restarted = submitted.restart().unwrap();
        assert_eq!(
            restarted.attach_analysis(epoch, "late").unwrap_err(),
            ExamError::StaleAnalysis
        );
    }

    #[test]
    fn restart_clears_everything_and_bumps_epoch() {
        let submitted = ExamSession::default()
            .select_subject(Subject::Geography)
            .unwrap()
            .load_questions(build_questions(4))
            .unwrap()
            .start(fixed_now())
            .unwrap()
            .go_to(3)
            .unwrap()
            .select_option(OptionKey::A)
            .unwrap()
            .submit(fixed_now())
            .unwrap();

        let restarted = submitted.restart().unwrap();
        assert_eq!(restarted.status(), ExamStatus::Idle);
        assert!(restarted.questions().is_empty());
        assert!(restarted.progress().is_empty());
        assert!(restarted.result().is_none());
        assert_eq!(restarted.current_index(), 0);
        assert_eq!(restarted.time_left(), 3600);
        assert_eq!(restarted.epoch(), submitted.epoch().next());
        assert_eq!(restarted.subject(), Subject::Geography);
    }

    #[test]
    fn restart_requires_submitted() {
        assert!(matches!(
            ongoing(1).restart(),
            Err(ExamError::InvalidState {
                expected: ExamStatus::Submitted,
                ..
            })
        ));
    }

    #[test]
    fn apply_routes_intents() {
        let now = fixed_now();
        let session = ExamSession::default()
            .apply(ExamIntent::SelectSubject(Subject::Polity), now)
            .unwrap()
            .load_questions(build_questions(3))
            .unwrap();
        let session = [
            ExamIntent::Start,
            ExamIntent::SelectOption(OptionKey::B),
            ExamIntent::Next,
            ExamIntent::MarkForReview,
            ExamIntent::Previous,
            ExamIntent::GoTo(0),
        ]
        .into_iter()
        .try_fold(session, |s, intent| s.apply(intent, now))
        .unwrap();
        assert_eq!(session.subject(), Subject::Polity);
        assert_eq!(session.current_index(), 0);

        let done = session.apply(ExamIntent::Submit, now).unwrap();
        assert_eq!(done.result().unwrap().correct(), 1);
        let idle = done.apply(ExamIntent::Restart, now).unwrap();
        assert_eq!(idle.status(), ExamStatus::Idle);
    }
}
