mod controller;
mod countdown;
mod guard;

// Public API of the exam subsystem.
pub use crate::error::ControllerError;
pub use controller::{ExamController, ExamSnapshot, SubmitTrigger};
pub use guard::SubmitGuard;
