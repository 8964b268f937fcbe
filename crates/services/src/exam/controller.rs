//! Async orchestration around the pure `ExamSession` state machine.
//!
//! The controller owns the live session behind a mutex, publishes every
//! change on a `watch` channel and runs the two background jobs a session
//! needs: the countdown and the post-submit analysis request.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use exam_core::model::{ExamResult, Question, SessionEpoch};
use exam_core::{Clock, ExamConfig, ExamError, ExamIntent, ExamSession, ExamStatus};

use super::countdown::{TickOutcome, spawn_countdown};
use super::guard::SubmitGuard;
use crate::error::ControllerError;
use crate::providers::{AnalysisProvider, QuestionProvider};

/// What caused a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    Timeout,
}

impl fmt::Display for SubmitTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitTrigger::Manual => f.write_str("manual"),
            SubmitTrigger::Timeout => f.write_str("timeout"),
        }
    }
}

/// Published view of the controller state.
#[derive(Debug, Clone)]
pub struct ExamSnapshot {
    session: ExamSession,
    loading: bool,
}

impl ExamSnapshot {
    #[must_use]
    pub fn session(&self) -> &ExamSession {
        &self.session
    }

    /// True while questions are being generated.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

struct ControllerState {
    session: ExamSession,
    loading: bool,
    countdown: Option<CancellationToken>,
    analysis_task: Option<CancellationToken>,
    guard: Arc<SubmitGuard>,
}

impl ControllerState {
    fn snapshot(&self) -> ExamSnapshot {
        ExamSnapshot {
            session: self.session.clone(),
            loading: self.loading,
        }
    }

    fn stop_countdown(&mut self) {
        if let Some(token) = self.countdown.take() {
            token.cancel();
        }
    }

    fn cancel_analysis(&mut self) {
        if let Some(token) = self.analysis_task.take() {
            token.cancel();
        }
    }
}

struct Inner {
    clock: Clock,
    questions: Arc<dyn QuestionProvider>,
    analysis: Arc<dyn AnalysisProvider>,
    state: Mutex<ControllerState>,
    updates: watch::Sender<ExamSnapshot>,
}

/// Cheaply cloneable handle to one exam session.
#[derive(Clone)]
pub struct ExamController {
    inner: Arc<Inner>,
}

impl ExamController {
    #[must_use]
    pub fn new(
        config: ExamConfig,
        clock: Clock,
        questions: Arc<dyn QuestionProvider>,
        analysis: Arc<dyn AnalysisProvider>,
    ) -> Self {
        let state = ControllerState {
            session: ExamSession::new(config),
            loading: false,
            countdown: None,
            analysis_task: None,
            guard: Arc::new(SubmitGuard::new()),
        };
        let (updates, _) = watch::channel(state.snapshot());
        Self {
            inner: Arc::new(Inner {
                clock,
                questions,
                analysis,
                state: Mutex::new(state),
                updates,
            }),
        }
    }

    /// Current state, cloned.
    #[must_use]
    pub fn snapshot(&self) -> ExamSnapshot {
        self.inner.updates.borrow().clone()
    }

    /// Receiver notified after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ExamSnapshot> {
        self.inner.updates.subscribe()
    }

    /// Generate questions for the selected subject and move to `Instructions`.
    ///
    /// On failure the session stays in `Idle` with a user-facing message.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::LoadInProgress` when a load is already
    /// running, `ControllerError::Load` when the provider fails,
    /// `ControllerError::NoQuestions` when it returns nothing usable, and
    /// `ControllerError::Exam` outside `Idle`.
    pub async fn begin_preparation(&self) -> Result<(), ControllerError> {
        let (subject, epoch, count) = {
            let mut state = self.inner.lock();
            if state.loading {
                return Err(ControllerError::LoadInProgress);
            }
            let session = &state.session;
            if session.status() != ExamStatus::Idle {
                return Err(ControllerError::Exam(ExamError::InvalidState {
                    expected: ExamStatus::Idle,
                    actual: session.status(),
                }));
            }
            let request = (
                session.subject(),
                session.epoch(),
                session.config().question_count(),
            );
            state.loading = true;
            self.inner.publish(&state);
            request
        };
        let pending = PendingLoad::new(&self.inner);

        info!(%subject, count, "generating questions");
        let outcome = self.inner.questions.generate(subject, count).await;
        pending.complete();

        let mut state = self.inner.lock();
        state.loading = false;
        if state.session.epoch() != epoch || state.session.status() != ExamStatus::Idle {
            debug!(%subject, "discarding question load for a session that moved on");
            self.inner.publish(&state);
            return Ok(());
        }

        let drafts = match outcome {
            Ok(drafts) => drafts,
            Err(err) => {
                warn!(%subject, error = %err, "question generation failed");
                state.session = state.session.record_load_failure(err.user_message())?;
                self.inner.publish(&state);
                return Err(ControllerError::Load(err));
            }
        };

        let questions: Vec<Question> = drafts
            .into_iter()
            .filter_map(|draft| match draft.validate(subject) {
                Ok(question) => Some(question),
                Err(err) => {
                    warn!(error = %err, "dropping invalid question");
                    None
                }
            })
            .collect();

        match state.session.load_questions(questions) {
            Ok(next) => {
                info!(%subject, loaded = next.total_questions(), "questions ready");
                state.session = next;
                self.inner.publish(&state);
                Ok(())
            }
            Err(err) => {
                warn!(%subject, error = %err, "question set rejected");
                state.session = state
                    .session
                    .record_load_failure("No questions were returned. Please try again.")?;
                self.inner.publish(&state);
                Err(err.into())
            }
        }
    }

    /// Apply a user intent. `Start` launches the countdown, `Submit` goes
    /// through the submit guard and `Restart` stops all background work.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::LoadInProgress` for a subject change while
    /// loading, otherwise whatever the underlying transition reports.
    pub fn dispatch(&self, intent: ExamIntent) -> Result<(), ControllerError> {
        match intent {
            ExamIntent::Submit => self.submit(SubmitTrigger::Manual).map(|_| ()),
            ExamIntent::Start => self.inner.start(),
            ExamIntent::Restart => self.inner.restart(),
            other => self.inner.apply(other),
        }
    }

    /// Submit the current attempt. Manual submission and timer expiry share
    /// this path; whichever arrives second gets `AlreadySubmitted`.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::AlreadySubmitted` on a repeated submit and
    /// `ControllerError::Exam` before the attempt has started.
    pub fn submit(&self, trigger: SubmitTrigger) -> Result<ExamResult, ControllerError> {
        self.inner.submit(trigger)
    }

    /// Stop the countdown and any pending analysis request.
    pub fn shutdown(&self) {
        let mut state = self.inner.lock();
        state.stop_countdown();
        state.cancel_analysis();
    }
}

impl fmt::Debug for ExamController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExamController")
            .field("session", self.inner.updates.borrow().session())
            .finish_non_exhaustive()
    }
}

/// Clears the loading flag if a `begin_preparation` future is dropped
/// before the provider answers.
struct PendingLoad<'a> {
    inner: &'a Inner,
    armed: bool,
}

impl<'a> PendingLoad<'a> {
    fn new(inner: &'a Inner) -> Self {
        Self { inner, armed: true }
    }

    fn complete(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.inner.lock();
        state.loading = false;
        debug!("question load abandoned");
        self.inner.publish(&state);
    }
}

//
// ─── INNER ────────────────────────────────────────────────────────────────────
//

impl Inner {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &ControllerState) {
        self.updates.send_replace(state.snapshot());
    }

    fn apply(&self, intent: ExamIntent) -> Result<(), ControllerError> {
        let mut state = self.lock();
        if matches!(intent, ExamIntent::SelectSubject(_)) && state.loading {
            return Err(ControllerError::LoadInProgress);
        }
        let next = state.session.apply(intent, self.clock.now())?;
        debug!(?intent, index = next.current_index(), "applied intent");
        state.session = next;
        self.publish(&state);
        Ok(())
    }

    fn start(self: &Arc<Self>) -> Result<(), ControllerError> {
        let mut state = self.lock();
        let next = state.session.start(self.clock.now())?;
        let epoch = next.epoch();
        info!(
            subject = %next.subject(),
            questions = next.total_questions(),
            duration_secs = next.time_left(),
            "exam started"
        );
        let tick = next.config().tick();
        state.session = next;

        state.stop_countdown();
        let token = CancellationToken::new();
        state.countdown = Some(token.clone());
        let weak = Arc::downgrade(self);
        spawn_countdown(tick, token, move || match weak.upgrade() {
            Some(inner) => inner.on_tick(epoch),
            None => TickOutcome::Finished,
        });

        self.publish(&state);
        Ok(())
    }

    fn on_tick(self: &Arc<Self>, epoch: SessionEpoch) -> TickOutcome {
        let mut state = self.lock();
        if state.session.epoch() != epoch || state.session.status() != ExamStatus::Ongoing {
            return TickOutcome::Finished;
        }
        let next = match state.session.tick(self.clock.now()) {
            Ok(next) => next,
            Err(err) => {
                debug!(error = %err, "countdown stopped");
                return TickOutcome::Finished;
            }
        };
        if next.status() != ExamStatus::Submitted {
            state.session = next;
            self.publish(&state);
            return TickOutcome::Running;
        }
        if state.guard.try_claim() {
            state.session = next;
            self.finish_submission(&mut state, SubmitTrigger::Timeout);
        }
        TickOutcome::Finished
    }

    fn submit(self: &Arc<Self>, trigger: SubmitTrigger) -> Result<ExamResult, ControllerError> {
        let mut state = self.lock();
        let next = state.session.submit(self.clock.now())?;
        if !state.guard.try_claim() {
            return Err(ControllerError::AlreadySubmitted);
        }
        let Some(result) = next.result().cloned() else {
            return Err(ControllerError::Exam(ExamError::InvalidState {
                expected: ExamStatus::Submitted,
                actual: next.status(),
            }));
        };
        state.session = next;
        self.finish_submission(&mut state, trigger);
        Ok(result)
    }

    fn finish_submission(self: &Arc<Self>, state: &mut ControllerState, trigger: SubmitTrigger) {
        state.stop_countdown();
        let Some(result) = state.session.result().cloned() else {
            self.publish(state);
            return;
        };
        info!(
            %trigger,
            score = result.score(),
            answered = result.answered(),
            correct = result.correct(),
            wrong = result.wrong(),
            "exam submitted"
        );
        self.publish(state);
        self.spawn_analysis(state, result);
    }

    fn spawn_analysis(self: &Arc<Self>, state: &mut ControllerState, result: ExamResult) {
        state.cancel_analysis();
        let token = CancellationToken::new();
        state.analysis_task = Some(token.clone());

        let epoch = state.session.epoch();
        let subject = state.session.subject();
        let provider = Arc::clone(&self.analysis);
        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!(epoch = epoch.value(), "analysis request cancelled");
                    return;
                }
                outcome = provider.analyze(&result, subject) => outcome,
            };
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match outcome {
                Ok(text) => inner.attach_analysis(epoch, text),
                Err(err) => warn!(%subject, error = %err, "analysis request failed"),
            }
        });
    }

    fn attach_analysis(&self, epoch: SessionEpoch, text: String) {
        let mut state = self.lock();
        match state.session.attach_analysis(epoch, text) {
            Ok(next) => {
                state.session = next;
                state.analysis_task = None;
                self.publish(&state);
            }
            Err(err) => debug!(epoch = epoch.value(), error = %err, "dropping late analysis"),
        }
    }

    fn restart(&self) -> Result<(), ControllerError> {
        let mut state = self.lock();
        let next = state.session.restart()?;
        state.stop_countdown();
        state.cancel_analysis();
        state.guard = Arc::new(SubmitGuard::new());
        info!(epoch = next.epoch().value(), "session restarted");
        state.session = next;
        self.publish(&state);
        Ok(())
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let state = self
            .state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        state.stop_countdown();
        state.cancel_analysis();
    }
}
