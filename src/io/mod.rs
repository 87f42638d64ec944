//! I/O utilities for panelize.
//!
//! Provides story file reading with memory mapping support for large
//! files, comic export, and Unicode helpers.

pub mod export;
pub mod reader;
pub mod unicode;

pub use export::{MANIFEST_NAME, export_comic, render_panel};
pub use reader::{FileReader, MAX_STORY_SIZE, read_file, read_story, write_file};
pub use unicode::{grapheme_count, preview, truncate_graphemes};
