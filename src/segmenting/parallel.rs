//! Parallel batch segmentation.
//!
//! Wraps another segmenter and segments many stories at once using rayon.

use crate::segmenting::traits::Segmenter;
use rayon::prelude::*;

/// Batch segmentation orchestrator.
///
/// A single story is handed straight to the inner segmenter; splitting one
/// story across threads would change where sentence pairs fall. Batches of
/// stories are processed in parallel and returned in input order.
///
/// # Examples
///
/// ```
/// use panelize::segmenting::{ParallelSegmenter, SentenceSegmenter};
///
/// let segmenter = ParallelSegmenter::new(SentenceSegmenter::new());
/// let batch = segmenter.segment_batch(&["A. B.", "C"]);
/// assert_eq!(batch, vec![vec!["A. B".to_string()], vec!["C".to_string()]]);
/// ```
#[derive(Debug, Clone)]
pub struct ParallelSegmenter<S: Segmenter> {
    /// The segmenter applied to each story.
    inner: S,
    /// Minimum batch size before work is spread over threads.
    min_parallel_batch: usize,
}

impl<S: Segmenter> ParallelSegmenter<S> {
    /// Creates a parallel segmenter wrapping `inner`.
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            min_parallel_batch: 2,
        }
    }

    /// Sets the minimum batch size for parallel processing.
    ///
    /// Smaller batches are segmented sequentially.
    #[must_use]
    pub fn min_parallel_batch(mut self, size: usize) -> Self {
        self.min_parallel_batch = size.max(1);
        self
    }

    /// Segments every story in `stories`, preserving order.
    pub fn segment_batch<T>(&self, stories: &[T]) -> Vec<Vec<String>>
    where
        T: AsRef<str> + Sync,
    {
        if stories.len() < self.min_parallel_batch {
            return stories
                .iter()
                .map(|story| self.inner.segment(story.as_ref()))
                .collect();
        }

        tracing::debug!(stories = stories.len(), "segmenting batch in parallel");
        stories
            .par_iter()
            .map(|story| self.inner.segment(story.as_ref()))
            .collect()
    }
}

impl<S: Segmenter> Segmenter for ParallelSegmenter<S> {
    fn segment(&self, text: &str) -> Vec<String> {
        self.inner.segment(text)
    }

    fn segment_all(&self, stories: &[String]) -> Vec<Vec<String>> {
        self.segment_batch(stories)
    }

    fn name(&self) -> &'static str {
        "parallel"
    }

    fn supports_parallel(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Batch segmentation using rayon for multi-threaded processing"
    }
}
