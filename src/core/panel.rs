//! Panel representation.
//!
//! A [`Panel`] is what segmentation produces: a caption and its position.
//! A [`ComicPanel`] is the editable unit the comic editor works with, a
//! caption plus the identifier, illustration style and dialogue lines that
//! are attached after segmentation.

use crate::core::style::ArtStyle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder caption for panels added by hand.
pub const NEW_PANEL_TEXT: &str = "הזן טקסט לפנל החדש...";

/// One caption produced by segmenting a story.
///
/// # Examples
///
/// ```
/// use panelize::core::Panel;
///
/// let panel = Panel::new("Dana found the map", 0);
/// assert_eq!(panel.position, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    /// Trimmed caption text.
    pub text: String,

    /// Zero-based index in the segmented sequence.
    pub position: usize,
}

impl Panel {
    /// Creates a panel from a caption and its position.
    #[must_use]
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// An editable comic panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComicPanel {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Caption text.
    pub text: String,

    /// Illustration style for this panel.
    pub style: ArtStyle,

    /// Dialogue lines, in display order.
    pub dialogues: Vec<String>,

    /// Display position within the comic.
    pub position: usize,
}

impl ComicPanel {
    /// Creates a panel with a fresh identifier and no dialogue.
    #[must_use]
    pub fn new(text: impl Into<String>, style: ArtStyle, position: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            style,
            dialogues: Vec::new(),
            position,
        }
    }

    /// Creates an empty placeholder panel for the editor's "add panel" action.
    #[must_use]
    pub fn placeholder(style: ArtStyle, position: usize) -> Self {
        Self::new(NEW_PANEL_TEXT, style, position)
    }

    /// Attaches an identifier and style to a segmented panel.
    #[must_use]
    pub fn from_panel(panel: Panel, style: ArtStyle) -> Self {
        Self::new(panel.text, style, panel.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comic_panel_ids_are_unique() {
        let a = ComicPanel::new("one", ArtStyle::Comic, 0);
        let b = ComicPanel::new("one", ArtStyle::Comic, 0);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_placeholder() {
        let panel = ComicPanel::placeholder(ArtStyle::Anime, 3);
        assert_eq!(panel.text, NEW_PANEL_TEXT);
        assert_eq!(panel.style, ArtStyle::Anime);
        assert_eq!(panel.position, 3);
        assert!(panel.dialogues.is_empty());
    }

    #[test]
    fn test_from_panel_keeps_text_and_position() {
        let panel = ComicPanel::from_panel(Panel::new("A. B", 1), ArtStyle::Sketch);
        assert_eq!(panel.text, "A. B");
        assert_eq!(panel.position, 1);
        assert_eq!(panel.style, ArtStyle::Sketch);
    }

    #[test]
    fn test_serde_shape() {
        let panel = Panel::new("caption", 2);
        let json = serde_json::to_string(&panel).unwrap();
        assert_eq!(json, r#"{"text":"caption","position":2}"#);
    }
}
