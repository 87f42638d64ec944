//! Segmenter trait definition.
//!
//! Defines the interface for story segmentation strategies.

use crate::core::Panel;

/// Trait for turning story text into panel captions.
///
/// Implementations must be `Send + Sync` so stories can be segmented in
/// parallel, and must be pure: the same input always yields the same
/// captions, and no input is an error.
///
/// # Examples
///
/// ```
/// use panelize::segmenting::{Segmenter, SentenceSegmenter};
///
/// let segmenter = SentenceSegmenter::new();
/// let captions = segmenter.segment("One! Two? Three. Four.");
/// assert_eq!(captions, vec!["One. Two", "Three. Four"]);
/// ```
pub trait Segmenter: Send + Sync {
    /// Splits `text` into ordered panel captions.
    ///
    /// Degenerate input (empty, whitespace, terminators only) yields an
    /// empty vector.
    fn segment(&self, text: &str) -> Vec<String>;

    /// Returns the name of the strategy.
    fn name(&self) -> &'static str;

    /// Segments `text` and numbers each caption by its position.
    fn panels(&self, text: &str) -> Vec<Panel> {
        self.segment(text)
            .into_iter()
            .enumerate()
            .map(|(position, caption)| Panel::new(caption, position))
            .collect()
    }

    /// Segments several stories, returning their captions in input order.
    ///
    /// The default runs the stories one after another.
    fn segment_all(&self, stories: &[String]) -> Vec<Vec<String>> {
        stories.iter().map(|story| self.segment(story)).collect()
    }

    /// Returns whether this segmenter fans work out over threads.
    fn supports_parallel(&self) -> bool {
        false
    }

    /// Returns a description of the strategy.
    fn description(&self) -> &'static str {
        "No description available"
    }
}
