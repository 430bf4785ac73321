use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::app_config_dir;
use crate::ui::settings::UiSettings;

fn settings_path() -> PathBuf {
    app_config_dir().join("ui_settings.json")
}

pub fn load_settings() -> UiSettings {
    load_settings_from(&settings_path())
}

pub fn save_settings(settings: &UiSettings) {
    if let Err(err) = save_settings_to(&settings_path(), settings) {
        tracing::warn!("could not save settings: {err:#}");
    }
}

/// Missing or unreadable files fall back to defaults.
pub fn load_settings_from(path: &Path) -> UiSettings {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| serde_json::from_str::<UiSettings>(&s).ok())
        .unwrap_or_default()
        .sanitized()
}

pub fn save_settings_to(path: &Path, settings: &UiSettings) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::safety::SafetyTier;
    use crate::model::story::{Genre, Mood};

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ui_settings.json");

        let settings = UiSettings {
            genre: Genre::Mystery,
            mood: Mood::Melancholic,
            safety: SafetyTier::CreativeFreedom,
            temperature: 0.3,
            ..Default::default()
        };
        save_settings_to(&path, &settings).unwrap();

        assert_eq!(load_settings_from(&path), settings);
    }

    #[test]
    fn unknown_safety_tier_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ui_settings.json");
        fs::write(&path, r#"{"genre": "Romance", "safety": "Lenient"}"#).unwrap();

        assert_eq!(load_settings_from(&path), UiSettings::default());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            load_settings_from(&dir.path().join("absent.json")),
            UiSettings::default()
        );
    }
}
