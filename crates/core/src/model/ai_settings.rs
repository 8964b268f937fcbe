use thiserror::Error;
use url::Url;

pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

/// Connection settings for the generative question/analysis backend.
#[derive(Clone, PartialEq, Eq)]
pub struct AiSettings {
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Clone, Debug, Default)]
pub struct AiSettingsDraft {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AiSettingsError {
    #[error("API key is missing")]
    MissingApiKey,
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl AiSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft, filling defaults for model and base URL.
    ///
    /// # Errors
    ///
    /// Returns `AiSettingsError::MissingApiKey` when no key is set, or
    /// `AiSettingsError::InvalidBaseUrl` when the base URL does not parse.
    pub fn validate(self) -> Result<AiSettings, AiSettingsError> {
        let api_key = normalize_optional(self.api_key).ok_or(AiSettingsError::MissingApiKey)?;
        let model = normalize_optional(self.model).unwrap_or_else(|| DEFAULT_AI_MODEL.into());
        let base_url =
            normalize_optional(self.base_url).unwrap_or_else(|| DEFAULT_AI_BASE_URL.into());

        if Url::parse(&base_url).is_err() {
            return Err(AiSettingsError::InvalidBaseUrl(base_url));
        }

        Ok(AiSettings {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl AiSettings {
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for AiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiSettings")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
