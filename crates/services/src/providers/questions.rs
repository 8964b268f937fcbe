use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use exam_core::model::{QuestionDraft, Subject};

use super::QuestionProvider;
use super::chat::ChatClient;
use crate::error::ProviderError;

/// Generates questions through a chat-completions backend.
#[derive(Clone)]
pub struct GenerativeQuestionProvider {
    chat: ChatClient,
}

impl GenerativeQuestionProvider {
    #[must_use]
    pub fn new(chat: ChatClient) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl QuestionProvider for GenerativeQuestionProvider {
    async fn generate(
        &self,
        subject: Subject,
        count: usize,
    ) -> Result<Vec<QuestionDraft>, ProviderError> {
        let prompt = question_prompt(subject, count);
        let reply = self.chat.complete(&prompt, 0.7).await?;
        let mut drafts = parse_question_drafts(&reply)?;
        drafts.truncate(count);
        info!(subject = subject.slug(), received = drafts.len(), "questions generated");
        Ok(drafts)
    }
}

#[must_use]
pub fn question_prompt(subject: Subject, count: usize) -> String {
    let recency = if subject == Subject::CurrentAffairs {
        "Focus on news from the last 6 months.\n"
    } else {
        ""
    };
    format!(
        "Generate {count} UPSC Prelims level Multiple Choice Questions (MCQs) on the subject: {subject}.\n\
         Each question must have 4 options (A, B, C, D), a correct answer, and a detailed professional explanation.\n\
         Ensure the difficulty level is 'Hard' or 'Competitive'.\n\
         {recency}\
         Return the output strictly as a JSON array of objects with the fields \
         \"id\" (integer), \"text\", \"options\" (object with keys \"A\", \"B\", \"C\", \"D\"), \
         \"correctAnswer\" (one of \"A\", \"B\", \"C\", \"D\"), \"explanation\" and \"subject\"."
    )
}

/// Decode a model reply into drafts numbered `1..=n` in reply order.
///
/// The array may be wrapped in a fenced code block or surrounded by prose.
/// Items that do not match the question shape are skipped.
///
/// # Errors
///
/// Returns `ProviderError::EmptyResponse` when no JSON array is present and
/// `ProviderError::Decode` when the array itself is malformed.
pub fn parse_question_drafts(reply: &str) -> Result<Vec<QuestionDraft>, ProviderError> {
    let (Some(start), Some(end)) = (reply.find('['), reply.rfind(']')) else {
        return Err(ProviderError::EmptyResponse);
    };
    if end < start {
        return Err(ProviderError::EmptyResponse);
    }

    let items: Vec<Value> = serde_json::from_str(&reply[start..=end])?;
    let mut drafts = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<QuestionDraft>(item) {
            Ok(draft) => drafts.push(draft),
            Err(err) => warn!(position, %err, "skipping malformed question"),
        }
    }

    for (index, draft) in drafts.iter_mut().enumerate() {
        draft.id = u32::try_from(index + 1).unwrap_or(u32::MAX);
    }
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"Here you go:
```json
[
  {"id": 7, "text": "Q one", "options": {"A": "a", "B": "b", "C": "c", "D": "d"},
   "correctAnswer": "B", "explanation": "x", "subject": "History"},
  {"id": 7, "text": "broken"},
  {"id": 3, "text": "Q two", "options": {"A": "a", "B": "b", "C": "c", "D": "d"},
   "correctAnswer": "D", "explanation": "y", "subject": "History"}
]
```"#;

    #[test]
    fn parses_fenced_array_and_renumbers() {
        let drafts = parse_question_drafts(REPLY).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].id, 1);
        assert_eq!(drafts[0].text, "Q one");
        assert_eq!(drafts[1].id, 2);
        assert_eq!(drafts[1].correct_answer, "D");
    }

    #[test]
    fn reply_without_array_is_empty() {
        let err = parse_question_drafts("sorry, I cannot help").unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
    }

    #[test]
    fn malformed_array_is_decode_error() {
        let err = parse_question_drafts("[{\"id\": 1,]").unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[test]
    fn prompt_mentions_count_and_subject() {
        let prompt = question_prompt(Subject::CurrentAffairs, 50);
        assert!(prompt.contains("Generate 50"));
        assert!(prompt.contains("Current Affairs"));
        assert!(prompt.contains("last 6 months"));
        assert!(!question_prompt(Subject::Polity, 5).contains("last 6 months"));
    }
}
