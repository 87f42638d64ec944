//! Sentence-pair segmentation.
//!
//! Splits story text on runs of sentence-terminal punctuation and puts two
//! sentences on each panel.

use crate::segmenting::traits::Segmenter;
use crate::segmenting::{PANEL_GROUP_SIZE, PANEL_JOINER};
use regex::Regex;
use std::sync::OnceLock;

/// Matches one boundary: any run of `.`, `!` or `?`.
#[allow(clippy::expect_used)]
fn terminator_regex() -> &'static Regex {
    static TERMINATORS: OnceLock<Regex> = OnceLock::new();
    TERMINATORS.get_or_init(|| Regex::new(r"[.!?]+").expect("valid regex"))
}

/// Byte-order mark, treated as whitespace when trimming.
const BOM: char = '\u{FEFF}';

fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || c == BOM
}

/// Splits `text` into non-empty, trimmed sentence fragments.
///
/// Consecutive terminators such as `"?!"` or `"..."` count as one boundary.
/// Fragments that are empty after trimming whitespace and byte-order marks
/// are dropped.
#[must_use]
pub fn fragments(text: &str) -> Vec<&str> {
    terminator_regex()
        .split(text)
        .map(|fragment| fragment.trim_matches(is_blank_char))
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Segmenter that groups sentences in pairs.
///
/// The group size and the `". "` joiner are fixed; a trailing odd sentence
/// gets a panel of its own.
///
/// # Examples
///
/// ```
/// use panelize::segmenting::{Segmenter, SentenceSegmenter};
///
/// let segmenter = SentenceSegmenter::new();
/// assert_eq!(segmenter.segment("A. B. C."), vec!["A. B", "C"]);
/// assert!(segmenter.segment("  ").is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceSegmenter;

impl SentenceSegmenter {
    /// Creates a sentence segmenter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Segmenter for SentenceSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        fragments(text)
            .chunks(PANEL_GROUP_SIZE)
            .map(|group| {
                group
                    .join(PANEL_JOINER)
                    .trim_matches(is_blank_char)
                    .to_string()
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "sentence"
    }

    fn description(&self) -> &'static str {
        "Two sentences per panel, split on runs of . ! ?"
    }
}
