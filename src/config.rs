use secrecy::SecretString;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Contents of `secrets.json` in the app config directory.
#[derive(Debug, Default, Deserialize)]
pub struct SecretsFile {
    #[serde(rename = "GEMINI_API_KEY")]
    pub gemini_api_key: Option<String>,
}

/// Connection settings for the model service. Built once in `main`.
#[derive(Debug)]
pub struct GeminiConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
}

impl GeminiConfig {
    /// Load `.env`, then resolve from the process environment and the
    /// secrets file.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }

        Self::resolve(|name| std::env::var(name).ok(), load_secrets_file())
    }

    /// Environment wins over the secrets file. A blank key counts as missing.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        secrets: Option<SecretsFile>,
    ) -> Result<Self, ConfigError> {
        let api_key = env(API_KEY_VAR)
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                secrets
                    .and_then(|s| s.gemini_api_key)
                    .filter(|k| !k.trim().is_empty())
            })
            .ok_or(ConfigError::MissingApiKey)?;

        let model = env(MODEL_VAR)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = env(BASE_URL_VAR)
            .filter(|u| !u.trim().is_empty())
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url,
            model,
        })
    }
}

pub fn app_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("story_crafter");
    path
}

fn load_secrets_file() -> Option<SecretsFile> {
    let path = app_config_dir().join("secrets.json");
    let text = fs::read_to_string(&path).ok()?;

    match serde_json::from_str(&text) {
        Ok(secrets) => Some(secrets),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "ignoring unreadable secrets file");
            None
        }
    }
}
