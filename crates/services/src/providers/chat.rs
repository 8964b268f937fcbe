use std::env;

use exam_core::model::{AiSettings, AiSettingsDraft};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProviderError;

/// Minimal client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    settings: Option<AiSettings>,
}

impl ChatClient {
    /// Build from `EXAM_AI_API_KEY`, `EXAM_AI_BASE_URL` and `EXAM_AI_MODEL`.
    ///
    /// A missing key or an invalid base URL yields a disabled client.
    #[must_use]
    pub fn from_env() -> Self {
        let draft = AiSettingsDraft {
            api_key: env::var("EXAM_AI_API_KEY").ok(),
            model: env::var("EXAM_AI_MODEL").ok(),
            base_url: env::var("EXAM_AI_BASE_URL").ok(),
        };
        let settings = match draft.validate() {
            Ok(settings) => Some(settings),
            Err(err) => {
                debug!(%err, "generative backend disabled");
                None
            }
        };
        Self::new(settings)
    }

    #[must_use]
    pub fn new(settings: Option<AiSettings>) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.settings.is_some()
    }

    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.settings.as_ref().map(AiSettings::model)
    }

    /// Send a single user prompt and return the trimmed reply.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the client is disabled, the request fails,
    /// or the reply has no content.
    pub async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, ProviderError> {
        let settings = self.settings.as_ref().ok_or(ProviderError::Disabled)?;

        let url = format!("{}/chat/completions", settings.base_url());
        let payload = ChatRequest {
            model: settings.model(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(settings.api_key())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ProviderError::EmptyResponse)?;

        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
