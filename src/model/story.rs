use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Fantasy,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Mystery,
    Romance,
    Horror,
    Adventure,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Fantasy,
        Genre::SciFi,
        Genre::Mystery,
        Genre::Romance,
        Genre::Horror,
        Genre::Adventure,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Genre::Fantasy => "Fantasy",
            Genre::SciFi => "Sci-Fi",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::Horror => "Horror",
            Genre::Adventure => "Adventure",
        }
    }
}

impl Default for Genre {
    fn default() -> Self {
        Genre::SciFi
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Whimsical,
    Suspenseful,
    Dark,
    Hopeful,
    Humorous,
    Melancholic,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Whimsical,
        Mood::Suspenseful,
        Mood::Dark,
        Mood::Hopeful,
        Mood::Humorous,
        Mood::Melancholic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Whimsical => "Whimsical",
            Mood::Suspenseful => "Suspenseful",
            Mood::Dark => "Dark",
            Mood::Hopeful => "Hopeful",
            Mood::Humorous => "Humorous",
            Mood::Melancholic => "Melancholic",
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Suspenseful
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Starting text for the story form. Sci-Fi gets its own seed, every
/// other genre shares the fantasy one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    pub keywords: &'static str,
    pub prompt: &'static str,
}

impl FormDefaults {
    pub fn for_genre(genre: Genre) -> Self {
        match genre {
            Genre::SciFi => Self {
                keywords: "spaceship, alien artifact, quantum drive",
                prompt: "A lone astronaut discovers an ancient alien artifact that could change humanity's future...",
            },
            _ => Self {
                keywords: "dragon, magic, ancient map",
                prompt: "A young explorer discovers a hidden realm...",
            },
        }
    }
}

/// Heading shown above a finished story.
pub fn story_heading(genre: Genre, mood: Mood) -> String {
    format!("{genre} Story: {mood} Journey")
}
