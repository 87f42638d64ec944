//! Core domain models for panelize.
//!
//! This module contains the data structures the editor works with:
//! stories, panels, comics, art styles, story prompts and the session.
//! These are pure domain models with no I/O dependencies.

pub mod comic;
pub mod panel;
pub mod prompt;
pub mod session;
pub mod story;
pub mod style;

pub use comic::Comic;
pub use panel::{ComicPanel, NEW_PANEL_TEXT, Panel};
pub use prompt::{StoryGenre, StoryLength, story_prompt};
pub use session::{API_KEY_MIN_LEN, API_KEY_PREFIX, ApiKey, Session, User};
pub use story::{SAMPLE_STORY, Story};
pub use style::ArtStyle;

/// Returns the current Unix timestamp in seconds.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn current_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
