use async_trait::async_trait;

use exam_core::model::{ExamResult, Subject};

use super::AnalysisProvider;
use super::chat::ChatClient;
use crate::error::ProviderError;

/// Shown when the backend answers with nothing usable.
pub const ANALYSIS_FALLBACK: &str = "Unable to generate analysis at this time.";

/// Produces a mentor-style performance summary through a chat backend.
#[derive(Clone)]
pub struct GenerativeAnalysisProvider {
    chat: ChatClient,
}

impl GenerativeAnalysisProvider {
    #[must_use]
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl AnalysisProvider for GenerativeAnalysisProvider {
    async fn analyze(
        &self,
        result: &ExamResult,
        subject: Subject,
    ) -> Result<String, ProviderError> {
        let prompt = analysis_prompt(result, subject);
        match self.chat.complete(&prompt, 0.4).await {
            Ok(text) => Ok(text),
            Err(ProviderError::EmptyResponse) => Ok(ANALYSIS_FALLBACK.to_string()),
            Err(err) => Err(err),
        }
    }
}

#[must_use]
pub fn analysis_prompt(result: &ExamResult, subject: Subject) -> String {
    let max_score = u64::from(result.total_questions()) * 2;
    format!(
        "Act as a senior UPSC mentor. Analyze the following quiz performance for the subject '{subject}':\n\
         Score: {score:.2}/{max_score}\n\
         Correct: {correct}\n\
         Wrong: {wrong}\n\
         Unattempted: {unattempted}\n\
         Accuracy: {accuracy:.1}%\n\
         Time Taken: {minutes} minutes\n\n\
         Provide a professional summary of strong and weak areas, and a personalized study plan \
         for the next 7 days. Use professional yet encouraging tone.",
        score = result.score(),
        correct = result.correct(),
        wrong = result.wrong(),
        unattempted = result.unattempted(),
        accuracy = result.accuracy(),
        minutes = result.time_taken_secs() / 60,
    )
}
