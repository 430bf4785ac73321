use serde::{Deserialize, Serialize};

use crate::model::request::StoryOptions;
use crate::model::safety::SafetyTier;
use crate::model::story::{Genre, Mood};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Sidebar and toggle choices remembered between runs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiSettings {
    pub ui_scale: f32,

    pub genre: Genre,
    pub mood: Mood,
    pub safety: SafetyTier,
    pub temperature: f32,

    pub options: StoryOptions,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            ui_scale: 1.0,
            genre: Genre::default(),
            mood: Mood::default(),
            safety: SafetyTier::default(),
            temperature: DEFAULT_TEMPERATURE,
            options: StoryOptions::default(),
        }
    }
}

impl UiSettings {
    /// Pull hand-edited values back into the ranges the widgets allow.
    pub fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.temperature) {
            self.temperature = DEFAULT_TEMPERATURE;
        }
        if !(0.75..=2.0).contains(&self.ui_scale) {
            self.ui_scale = 1.0;
        }
        self
    }
}
