//! Story text.

use crate::io::unicode::grapheme_count;
use serde::{Deserialize, Serialize};

/// The fixed sample story offered in place of AI generation.
pub const SAMPLE_STORY: &str = "בעיר הגדולה, גילה דני כוחות מיוחדים. הוא ראה חתול תקוע על עץ והרים את ידו. החתול ירד לבד! דני הבין שיש לו כוח טלקינזיס. עם כוחות גדולים באה אחריות גדולה. דני החליט לעזור לאנשים. היום הראשון שלו כגיבור על התחיל עכשיו.";

/// A block of story text being edited.
///
/// # Examples
///
/// ```
/// use panelize::core::Story;
///
/// let story = Story::new("Once upon a time.");
/// assert!(!story.is_blank());
/// assert_eq!(story.char_count(), 17);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Raw story text, exactly as entered.
    pub text: String,
}

impl Story {
    /// Creates a story from text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the built-in sample story.
    #[must_use]
    pub fn sample() -> Self {
        Self::new(SAMPLE_STORY)
    }

    /// Returns whether the story is empty or whitespace only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of user-perceived characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        grapheme_count(&self.text)
    }
}

impl From<String> for Story {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for Story {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert!(Story::default().is_blank());
        assert!(Story::new(" \n\t ").is_blank());
        assert!(!Story::new(" a ").is_blank());
    }

    #[test]
    fn test_char_count_counts_graphemes() {
        assert_eq!(Story::new("שלום").char_count(), 4);
        assert_eq!(Story::new("e\u{301}").char_count(), 1);
    }

    #[test]
    fn test_sample_story_is_seven_sentences() {
        let story = Story::sample();
        let terminators = story.text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count();
        assert_eq!(terminators, 7);
    }
}
