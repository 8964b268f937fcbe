use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::subject::Subject;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id must be positive")]
    InvalidId,

    #[error("question {id} has no text")]
    EmptyText { id: u32 },

    #[error("question {id} option {key} is empty")]
    EmptyOption { id: u32, key: OptionKey },

    #[error("invalid option letter: {0:?}")]
    InvalidOptionKey(String),
}

//
// ─── OPTION KEY ───────────────────────────────────────────────────────────────
//

/// Letter identifying one of the four answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            OptionKey::A => 'A',
            OptionKey::B => 'B',
            OptionKey::C => 'C',
            OptionKey::D => 'D',
        }
    }

    /// Maps a letter (either case) to its key.
    #[must_use]
    pub fn from_char(value: char) -> Option<Self> {
        match value.to_ascii_uppercase() {
            'A' => Some(OptionKey::A),
            'B' => Some(OptionKey::B),
            'C' => Some(OptionKey::C),
            'D' => Some(OptionKey::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OptionKey {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                OptionKey::from_char(ch).ok_or_else(|| QuestionError::InvalidOptionKey(s.into()))
            }
            _ => Err(QuestionError::InvalidOptionKey(s.into())),
        }
    }
}

//
// ─── OPTIONS ──────────────────────────────────────────────────────────────────
//

/// The four lettered answer texts of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl QuestionOptions {
    #[must_use]
    pub fn new(
        a: impl Into<String>,
        b: impl Into<String>,
        c: impl Into<String>,
        d: impl Into<String>,
    ) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            d: d.into(),
        }
    }

    #[must_use]
    pub fn get(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::A => &self.a,
            OptionKey::B => &self.b,
            OptionKey::C => &self.c,
            OptionKey::D => &self.d,
        }
    }

    /// Options in letter order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// Unvalidated question as received from a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    #[serde(default)]
    pub id: u32,
    pub text: String,
    pub options: QuestionOptions,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionDraft {
    /// Validate and normalize the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the id is zero, the text or any option is
    /// blank, or the correct answer is not a letter A–D.
    pub fn validate(self, subject: Subject) -> Result<Question, QuestionError> {
        if self.id == 0 {
            return Err(QuestionError::InvalidId);
        }
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(QuestionError::EmptyText { id: self.id });
        }

        let options = QuestionOptions::new(
            self.options.a.trim(),
            self.options.b.trim(),
            self.options.c.trim(),
            self.options.d.trim(),
        );
        if let Some((key, _)) = options.iter().find(|(_, value)| value.is_empty()) {
            return Err(QuestionError::EmptyOption { id: self.id, key });
        }

        let correct_answer = self.correct_answer.parse::<OptionKey>()?;

        Ok(Question {
            id: QuestionId::new(self.id),
            text,
            options,
            correct_answer,
            explanation: self.explanation.trim().to_string(),
            subject,
        })
    }
}

/// A validated multiple-choice question. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: QuestionOptions,
    correct_answer: OptionKey,
    explanation: String,
    subject: Subject,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &QuestionOptions {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> OptionKey {
        self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn subject(&self) -> Subject {
        self.subject
    }

    #[must_use]
    pub fn is_correct(&self, key: OptionKey) -> bool {
        self.correct_answer == key
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
