//! Collaborators that produce questions and narrative analysis.

mod analysis;
mod chat;
mod questions;

use async_trait::async_trait;

use exam_core::model::{ExamResult, QuestionDraft, Subject};

use crate::error::ProviderError;

pub use analysis::{ANALYSIS_FALLBACK, GenerativeAnalysisProvider, analysis_prompt};
pub use chat::ChatClient;
pub use questions::{GenerativeQuestionProvider, parse_question_drafts, question_prompt};

/// Source of exam questions for a subject.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Generate up to `count` questions, in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the backend is unavailable or its reply
    /// cannot be decoded.
    async fn generate(
        &self,
        subject: Subject,
        count: usize,
    ) -> Result<Vec<QuestionDraft>, ProviderError>;
}

/// Source of the narrative performance summary shown after submission.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns `ProviderError` if the backend is unavailable.
    async fn analyze(&self, result: &ExamResult, subject: Subject)
    -> Result<String, ProviderError>;
}
