use std::sync::Arc;

use services::ExamController;

pub trait UiApp: Send + Sync {
    fn exam_controller(&self) -> ExamController;

    /// Whether a generative backend is configured.
    fn providers_enabled(&self) -> bool;
}

#[derive(Clone)]
pub struct AppContext {
    exam: ExamController,
    providers_enabled: bool,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            exam: app.exam_controller(),
            providers_enabled: app.providers_enabled(),
        }
    }

    #[must_use]
    pub fn exam(&self) -> ExamController {
        self.exam.clone()
    }

    #[must_use]
    pub fn providers_enabled(&self) -> bool {
        self.providers_enabled
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
