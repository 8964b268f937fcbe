use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot latch shared by the manual submit path and the countdown.
///
/// Whichever path claims it first performs the submission; the other backs off.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    claimed: AtomicBool,
}

impl SubmitGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` exactly once.
    pub fn try_claim(&self) -> bool {
        !self.claimed.swap(true, Ordering::AcqRel)
    }
}
