use services::ControllerError;

/// Errors surfaced in the view's banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Busy,
    AlreadySubmitted,
    LoadFailed,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Busy => "Questions are still being generated. Please wait.",
            ViewError::AlreadySubmitted => "This test has already been submitted.",
            ViewError::LoadFailed => "Could not load questions. Please try again.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&ControllerError> for ViewError {
    fn from(err: &ControllerError) -> Self {
        match err {
            ControllerError::LoadInProgress => ViewError::Busy,
            ControllerError::AlreadySubmitted => ViewError::AlreadySubmitted,
            ControllerError::Load(_) | ControllerError::NoQuestions => ViewError::LoadFailed,
            _ => ViewError::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_errors_map_to_banner_messages() {
        assert_eq!(
            ViewError::from(&ControllerError::LoadInProgress),
            ViewError::Busy
        );
        assert_eq!(
            ViewError::from(&ControllerError::AlreadySubmitted).message(),
            "This test has already been submitted."
        );
        assert_eq!(
            ViewError::from(&ControllerError::NoQuestions),
            ViewError::LoadFailed
        );
    }
}
