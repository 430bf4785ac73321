use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::story::{Genre, Mood};

pub fn story_file_name(genre: Genre, mood: Mood) -> String {
    format!("{genre}_{mood}_story.txt")
}

pub fn save_story(path: &Path, story: &str) -> anyhow::Result<()> {
    fs::write(path, story).with_context(|| format!("writing {}", path.display()))
}

/// Ask for a destination with the native save dialog and write the story
/// as plain text. `Ok(None)` means the user cancelled.
pub fn download_story(genre: Genre, mood: Mood, story: &str) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Download Story")
        .set_file_name(story_file_name(genre, mood))
        .add_filter("Plain text", &["txt"])
        .save_file()
    else {
        return Ok(None);
    };

    save_story(&path, story)?;
    tracing::info!(path = %path.display(), "story saved");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_uses_labels() {
        assert_eq!(
            story_file_name(Genre::SciFi, Mood::Suspenseful),
            "Sci-Fi_Suspenseful_story.txt"
        );
        assert_eq!(
            story_file_name(Genre::Fantasy, Mood::Whimsical),
            "Fantasy_Whimsical_story.txt"
        );
    }

    #[test]
    fn story_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(story_file_name(Genre::Horror, Mood::Dark));

        save_story(&path, "It was a dark night.\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "It was a dark night.\n");
    }

    #[test]
    fn unwritable_path_reports_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("story.txt");

        let err = save_story(&path, "x").unwrap_err();
        assert!(format!("{err:#}").contains("writing"));
    }
}
