use thiserror::Error;

/// Problems that stop the app before the window is usable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Gemini API key not found. Set it in .env or the secrets file")]
    MissingApiKey,
}

/// Rejections raised while building a `GenerationRequest`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("Please enter a story prompt")]
    EmptyPrompt,
    #[error("temperature must be within 0.0..=1.0, got {0}")]
    TemperatureOutOfRange(f32),
    #[error("unknown safety tier: {0:?}")]
    UnknownSafetyTier(String),
}

/// Failure of a single call to the model service.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("response withheld by the service ({reason})")]
    Blocked { reason: String },
    #[error("service returned no text")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
