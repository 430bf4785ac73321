use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::model::safety::SafetyTier;
use crate::model::story::{Genre, Mood};

/// Which follow-up sections to produce after the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryOptions {
    pub analysis: bool,
    pub extraction: bool,
    pub sequel: bool,
}

impl Default for StoryOptions {
    fn default() -> Self {
        Self {
            analysis: false,
            extraction: false,
            sequel: true,
        }
    }
}

/// One validated story submission. Built only through `new`, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    prompt: String,
    keywords: Vec<String>,
    mood: Mood,
    genre: Genre,
    temperature: f32,
    safety: SafetyTier,
    options: StoryOptions,
}

impl GenerationRequest {
    pub fn new(
        prompt: impl Into<String>,
        keywords: Vec<String>,
        mood: Mood,
        genre: Genre,
        temperature: f32,
        safety: SafetyTier,
        options: StoryOptions,
    ) -> Result<Self, RequestError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(RequestError::EmptyPrompt);
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(RequestError::TemperatureOutOfRange(temperature));
        }

        let keywords = keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        Ok(Self {
            prompt,
            keywords,
            mood,
            genre,
            temperature,
            safety,
            options,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn safety(&self) -> SafetyTier {
        self.safety
    }

    pub fn options(&self) -> StoryOptions {
        self.options
    }
}

/// Split comma separated keyword text, trimming entries and dropping blanks.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
