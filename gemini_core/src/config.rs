// Configuration for the Gemini client

use crate::error::GeminiError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

// Keep the key out of logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Read `GEMINI_API_KEY` (required) plus the optional `GEMINI_MODEL`,
    /// `GEMINI_BASE_URL` and `GEMINI_TEMPERATURE` overrides.
    pub fn from_env() -> Result<Self, GeminiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, GeminiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(GeminiError::MissingApiKey)?;

        let mut config = Self::new(api_key);

        if let Some(model) = lookup("GEMINI_MODEL").filter(|m| !m.trim().is_empty()) {
            config = config.with_model(model.trim());
        }
        if let Some(url) = lookup("GEMINI_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }
        if let Some(raw) = lookup("GEMINI_TEMPERATURE") {
            let temperature = raw.trim().parse().map_err(|_| {
                GeminiError::InvalidConfig(format!("GEMINI_TEMPERATURE is not a number: {raw}"))
            })?;
            config = config.with_temperature(temperature);
        }

        Ok(config)
    }

    /// Streaming endpoint, answering with Server-Sent Events.
    pub fn stream_url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        )
    }
}
