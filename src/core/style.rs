//! Illustration styles.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Illustration style attached to a comic panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtStyle {
    /// Classic comic book.
    #[default]
    Comic,
    /// Japanese anime.
    Anime,
    /// Realistic.
    Realistic,
    /// Cartoon / caricature.
    Cartoon,
    /// Watercolor.
    Watercolor,
    /// Pencil sketch.
    Sketch,
}

impl ArtStyle {
    /// All styles, in the order the editor lists them.
    pub const ALL: [Self; 6] = [
        Self::Anime,
        Self::Realistic,
        Self::Cartoon,
        Self::Comic,
        Self::Watercolor,
        Self::Sketch,
    ];

    /// Machine value used on the command line and in storage.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Comic => "comic",
            Self::Anime => "anime",
            Self::Realistic => "realistic",
            Self::Cartoon => "cartoon",
            Self::Watercolor => "watercolor",
            Self::Sketch => "sketch",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Comic => "קומיקס קלאסי",
            Self::Anime => "אנימה יפנית",
            Self::Realistic => "ריאליסטי",
            Self::Cartoon => "קריקטורה",
            Self::Watercolor => "צבעי מים",
            Self::Sketch => "סקיצה",
        }
    }

    /// Preview glyph shown next to the label.
    #[must_use]
    pub const fn preview(self) -> &'static str {
        match self {
            Self::Comic => "💥",
            Self::Anime => "🎌",
            Self::Realistic => "📷",
            Self::Cartoon => "🎨",
            Self::Watercolor => "🖌️",
            Self::Sketch => "✏️",
        }
    }
}

impl fmt::Display for ArtStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for ArtStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.value() == needle)
            .ok_or_else(|| ValidationError::UnknownStyle {
                name: s.to_string(),
            })
    }
}
