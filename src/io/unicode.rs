//! Unicode helpers for captions and previews.

use unicode_segmentation::UnicodeSegmentation;

/// Counts the number of grapheme clusters in a string.
///
/// Grapheme clusters are user-perceived characters, which may consist
/// of multiple Unicode code points (e.g., Hebrew letters with niqqud).
///
/// # Examples
///
/// ```
/// use panelize::io::unicode::grapheme_count;
///
/// assert_eq!(grapheme_count("Hello"), 5);
/// assert_eq!(grapheme_count("שלום"), 4);
/// ```
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Truncates a string at a grapheme cluster boundary.
///
/// Returns a slice containing at most `max_graphemes` grapheme clusters.
#[must_use]
pub fn truncate_graphemes(s: &str, max_graphemes: usize) -> &str {
    let mut end_byte = 0;

    for (count, grapheme) in s.graphemes(true).enumerate() {
        if count >= max_graphemes {
            break;
        }
        end_byte += grapheme.len();
    }

    &s[..end_byte]
}

/// Builds a single-line preview of at most `max_graphemes` clusters.
///
/// Newlines are shown as `\n` and an ellipsis marks truncation.
#[must_use]
pub fn preview(s: &str, max_graphemes: usize) -> String {
    let flat = s.replace('\n', "\\n");
    if grapheme_count(&flat) <= max_graphemes {
        return flat;
    }
    let keep = max_graphemes.saturating_sub(1);
    format!("{}…", truncate_graphemes(&flat, keep))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grapheme_count() {
        assert_eq!(grapheme_count("Hello"), 5);
        assert_eq!(grapheme_count("世界"), 2);
        assert_eq!(grapheme_count(""), 0);
        assert_eq!(grapheme_count("👍🏽"), 1);
    }

    #[test]
    fn test_truncate_graphemes() {
        assert_eq!(truncate_graphemes("Hello", 3), "Hel");
        assert_eq!(truncate_graphemes("שלום עולם", 4), "שלום");
        assert_eq!(truncate_graphemes("Hello", 10), "Hello");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("a\nb", 10), "a\\nb");
        assert_eq!(preview("abcdefghij", 5), "abcd…");
        assert_eq!(grapheme_count(&preview("שלום עולם יפה", 6)), 6);
    }
}
