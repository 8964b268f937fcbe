/// How close the countdown is to running out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Urgency {
    #[default]
    Normal,
    Warning,
    Danger,
    Critical,
}

impl Urgency {
    #[must_use]
    pub fn for_seconds(seconds: u32) -> Self {
        match seconds {
            0..=60 => Self::Critical,
            61..=300 => Self::Danger,
            301..=600 => Self::Warning,
            _ => Self::Normal,
        }
    }

    /// CSS modifier for the countdown pill.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Normal => "timer timer--normal",
            Self::Warning => "timer timer--warning",
            Self::Danger => "timer timer--danger",
            Self::Critical => "timer timer--critical",
        }
    }
}

/// `MM:SS`, minutes zero-padded and allowed to exceed 99.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02}:{remainder:02}")
}

/// `Xm Ys`, as shown on the results dashboard.
#[must_use]
pub fn format_elapsed(seconds: u32) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}
