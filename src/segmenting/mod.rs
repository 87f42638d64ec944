//! Story segmentation for panelize.
//!
//! Turns free-form story text into an ordered list of panel captions.
//! Two strategies are available:
//!
//! - **Sentence**: split on runs of `.`, `!`, `?` and put two sentences on each panel
//! - **Parallel**: the sentence strategy applied to batches of stories with rayon

pub mod parallel;
pub mod sentence;
pub mod traits;

pub use parallel::ParallelSegmenter;
pub use sentence::{SentenceSegmenter, fragments};
pub use traits::Segmenter;

/// Sentences per panel. Fixed; not a tunable default.
pub const PANEL_GROUP_SIZE: usize = 2;

/// Separator placed between the sentences of one panel.
pub const PANEL_JOINER: &str = ". ";

/// Segments story text into panel captions with the sentence strategy.
///
/// # Examples
///
/// ```
/// use panelize::segmenting::segment;
///
/// assert_eq!(segment("A. B. C."), vec!["A. B", "C"]);
/// assert!(segment("").is_empty());
/// ```
#[must_use]
pub fn segment(text: &str) -> Vec<String> {
    SentenceSegmenter::new().segment(text)
}

/// Creates a segmenter by name.
///
/// # Errors
///
/// Returns [`crate::error::SegmentingError::UnknownStrategy`] if the name is not recognized.
pub fn create_segmenter(name: &str) -> crate::error::Result<Box<dyn Segmenter>> {
    match name.to_lowercase().as_str() {
        "sentence" => Ok(Box::new(SentenceSegmenter::new())),
        "parallel" => Ok(Box::new(ParallelSegmenter::new(SentenceSegmenter::new()))),
        _ => Err(crate::error::SegmentingError::UnknownStrategy {
            name: name.to_string(),
        }
        .into()),
    }
}

/// Lists available segmentation strategy names.
#[must_use]
pub fn available_strategies() -> Vec<&'static str> {
    vec!["sentence", "parallel"]
}
