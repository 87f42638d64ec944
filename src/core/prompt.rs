//! Story genres, lengths and generation prompts.
//!
//! Builds the prompt text a story generator would receive. Nothing here
//! talks to a generator; the prompt is plain data.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Story genre offered by the story editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryGenre {
    /// Adventure.
    Adventure,
    /// Comedy.
    Comedy,
    /// Drama.
    Drama,
    /// Fantasy.
    Fantasy,
    /// Mystery.
    Mystery,
    /// Romance.
    Romance,
    /// Science fiction.
    Scifi,
    /// Superhero.
    Superhero,
}

impl StoryGenre {
    /// All genres, in menu order.
    pub const ALL: [Self; 8] = [
        Self::Adventure,
        Self::Comedy,
        Self::Drama,
        Self::Fantasy,
        Self::Mystery,
        Self::Romance,
        Self::Scifi,
        Self::Superhero,
    ];

    /// Machine value.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Adventure => "adventure",
            Self::Comedy => "comedy",
            Self::Drama => "drama",
            Self::Fantasy => "fantasy",
            Self::Mystery => "mystery",
            Self::Romance => "romance",
            Self::Scifi => "scifi",
            Self::Superhero => "superhero",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Adventure => "הרפתקאות",
            Self::Comedy => "קומדיה",
            Self::Drama => "דרמה",
            Self::Fantasy => "פנטזיה",
            Self::Mystery => "מסתורין",
            Self::Romance => "רומנטיקה",
            Self::Scifi => "מדע בדיוני",
            Self::Superhero => "גיבורי על",
        }
    }

    /// Opening clause of the generation prompt.
    const fn prompt(self) -> &'static str {
        match self {
            Self::Adventure => "צור סיפור הרפתקאות מרגש על",
            Self::Comedy => "צור סיפור קומי ומשעשע על",
            Self::Drama => "צור סיפור דרמטי ומרגש על",
            Self::Fantasy => "צור סיפור פנטזיה קסום על",
            Self::Mystery => "צור סיפור מסתורין מותח על",
            Self::Romance => "צור סיפור רומנטי על",
            Self::Scifi => "צור סיפור מדע בדיוני על",
            Self::Superhero => "צור סיפור על גיבור על",
        }
    }
}

/// Requested story length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryLength {
    /// Four to six sentences.
    Short,
    /// Eight to ten sentences.
    Medium,
    /// Twelve to sixteen sentences.
    Long,
}

impl StoryLength {
    /// All lengths, shortest first.
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Machine value.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Display label (in panels).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Short => "קצר (4-6 פנלים)",
            Self::Medium => "בינוני (8-10 פנלים)",
            Self::Long => "ארוך (12-16 פנלים)",
        }
    }

    /// Length description used in the prompt (in sentences).
    const fn prompt(self) -> &'static str {
        match self {
            Self::Short => "קצר (4-6 משפטים)",
            Self::Medium => "בינוני (8-10 משפטים)",
            Self::Long => "ארוך (12-16 משפטים)",
        }
    }

    /// Inclusive sentence range this length asks for.
    #[must_use]
    pub const fn sentence_range(self) -> (usize, usize) {
        match self {
            Self::Short => (4, 6),
            Self::Medium => (8, 10),
            Self::Long => (12, 16),
        }
    }
}

macro_rules! impl_value_enum {
    ($ty:ty, $err:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.value())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_lowercase();
                Self::ALL
                    .into_iter()
                    .find(|v| v.value() == needle)
                    .ok_or_else(|| ValidationError::$err {
                        name: s.to_string(),
                    })
            }
        }
    };
}

impl_value_enum!(StoryGenre, UnknownGenre);
impl_value_enum!(StoryLength, UnknownLength);

/// Builds the story generation prompt for a genre and length.
///
/// # Examples
///
/// ```
/// use panelize::core::{StoryGenre, StoryLength, story_prompt};
///
/// let prompt = story_prompt(StoryGenre::Comedy, StoryLength::Short);
/// assert_eq!(prompt, "צור סיפור קומי ומשעשע על - קצר (4-6 משפטים)");
/// ```
#[must_use]
pub fn story_prompt(genre: StoryGenre, length: StoryLength) -> String {
    format!("{} - {}", genre.prompt(), length.prompt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_prompt() {
        assert_eq!(
            story_prompt(StoryGenre::Superhero, StoryLength::Long),
            "צור סיפור על גיבור על - ארוך (12-16 משפטים)"
        );
    }

    #[test]
    fn test_parse_genre() {
        assert_eq!("SciFi".parse::<StoryGenre>(), Ok(StoryGenre::Scifi));
        assert!(matches!(
            "western".parse::<StoryGenre>(),
            Err(ValidationError::UnknownGenre { .. })
        ));
    }

    #[test]
    fn test_parse_length() {
        assert_eq!("medium".parse::<StoryLength>(), Ok(StoryLength::Medium));
        assert!(matches!(
            "epic".parse::<StoryLength>(),
            Err(ValidationError::UnknownLength { .. })
        ));
    }

    #[test]
    fn test_every_genre_has_a_prompt() {
        for genre in StoryGenre::ALL {
            let prompt = story_prompt(genre, StoryLength::Medium);
            assert!(prompt.starts_with("צור סיפור"));
            assert!(prompt.ends_with("בינוני (8-10 משפטים)"));
        }
    }

    #[test]
    fn test_sentence_ranges_are_ordered() {
        let mut last = 0;
        for length in StoryLength::ALL {
            let (lo, hi) = length.sentence_range();
            assert!(lo <= hi);
            assert!(lo > last);
            last = hi;
        }
    }
}
