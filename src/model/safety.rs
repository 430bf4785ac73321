use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RequestError;

/// User-facing content safety selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SafetyTier {
    #[default]
    Strict,
    Moderate,
    CreativeFreedom,
}

impl SafetyTier {
    pub const ALL: [SafetyTier; 3] = [
        SafetyTier::Strict,
        SafetyTier::Moderate,
        SafetyTier::CreativeFreedom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SafetyTier::Strict => "Strict (Recommended)",
            SafetyTier::Moderate => "Moderate",
            SafetyTier::CreativeFreedom => "Creative Freedom",
        }
    }
}

impl fmt::Display for SafetyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SafetyTier {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.label() == s)
            .ok_or_else(|| RequestError::UnknownSafetyTier(s.to_string()))
    }
}

impl TryFrom<String> for SafetyTier {
    type Error = RequestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SafetyTier> for String {
    fn from(tier: SafetyTier) -> Self {
        tier.label().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Static tier → threshold table handed to the dispatcher at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyPolicy {
    strict: [SafetySetting; 4],
    moderate: [SafetySetting; 4],
    creative_freedom: [SafetySetting; 4],
}

impl Default for SafetyPolicy {
    fn default() -> Self {
        use HarmBlockThreshold::*;

        Self {
            strict: thresholds(
                BlockMediumAndAbove,
                BlockMediumAndAbove,
                BlockMediumAndAbove,
                BlockMediumAndAbove,
            ),
            moderate: thresholds(
                BlockOnlyHigh,
                BlockOnlyHigh,
                BlockOnlyHigh,
                BlockMediumAndAbove,
            ),
            creative_freedom: thresholds(BlockNone, BlockNone, BlockNone, BlockNone),
        }
    }
}

impl SafetyPolicy {
    pub fn settings_for(&self, tier: SafetyTier) -> &[SafetySetting] {
        match tier {
            SafetyTier::Strict => &self.strict,
            SafetyTier::Moderate => &self.moderate,
            SafetyTier::CreativeFreedom => &self.creative_freedom,
        }
    }
}

fn thresholds(
    harassment: HarmBlockThreshold,
    hate_speech: HarmBlockThreshold,
    sexual: HarmBlockThreshold,
    dangerous: HarmBlockThreshold,
) -> [SafetySetting; 4] {
    [
        SafetySetting { category: HarmCategory::Harassment, threshold: harassment },
        SafetySetting { category: HarmCategory::HateSpeech, threshold: hate_speech },
        SafetySetting { category: HarmCategory::SexuallyExplicit, threshold: sexual },
        SafetySetting { category: HarmCategory::DangerousContent, threshold: dangerous },
    ]
}
