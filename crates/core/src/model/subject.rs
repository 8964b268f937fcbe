use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown subject: {0}")]
pub struct SubjectParseError(pub String);

/// Fixed set of exam focus areas a session can be generated for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[default]
    #[serde(rename = "Current Affairs")]
    CurrentAffairs,
    #[serde(rename = "History")]
    History,
    #[serde(rename = "Geography")]
    Geography,
    #[serde(rename = "Polity")]
    Polity,
    #[serde(rename = "Economy")]
    Economy,
    #[serde(rename = "Environment & Ecology")]
    Environment,
    #[serde(rename = "Science & Tech")]
    ScienceTech,
    #[serde(rename = "Mixed Full-Length Test")]
    Mixed,
}

impl Subject {
    pub const ALL: [Subject; 8] = [
        Subject::CurrentAffairs,
        Subject::History,
        Subject::Geography,
        Subject::Polity,
        Subject::Economy,
        Subject::Environment,
        Subject::ScienceTech,
        Subject::Mixed,
    ];

    /// Human-readable name, also used in prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Subject::CurrentAffairs => "Current Affairs",
            Subject::History => "History",
            Subject::Geography => "Geography",
            Subject::Polity => "Polity",
            Subject::Economy => "Economy",
            Subject::Environment => "Environment & Ecology",
            Subject::ScienceTech => "Science & Tech",
            Subject::Mixed => "Mixed Full-Length Test",
        }
    }

    /// Stable kebab-case key for CLI flags and env vars.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Subject::CurrentAffairs => "current-affairs",
            Subject::History => "history",
            Subject::Geography => "geography",
            Subject::Polity => "polity",
            Subject::Economy => "economy",
            Subject::Environment => "environment",
            Subject::ScienceTech => "science-tech",
            Subject::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Subject {
    type Err = SubjectParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Subject::ALL
            .into_iter()
            .find(|subject| {
                subject.slug().eq_ignore_ascii_case(needle)
                    || subject.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| SubjectParseError(needle.to_string()))
    }
}
