//! # panelize
//!
//! Turn a short story into comic panels.
//!
//! panelize splits story text on sentence terminators, pairs the sentences
//! up into panel captions, and keeps an editable comic (styles, dialogue,
//! panel order) in a local session database.
//!
//! ## Features
//!
//! - **Segmentation**: Sentence-pair captions, with a rayon-backed batch mode
//! - **Comic Editing**: Add, remove, reorder and restyle panels
//! - **`SQLite` Storage**: Local key-value session state
//! - **Memory Mapping**: Efficient reading of large story files
//!
//! ## Example
//!
//! ```
//! use panelize::segment;
//!
//! let panels = segment("One! Two? Three. Four.");
//! assert_eq!(panels, vec!["One. Two", "Three. Four"]);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod segmenting;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use crate::core::{ArtStyle, Comic, ComicPanel, Panel, Session, Story};

// Re-export storage types
pub use storage::{DEFAULT_DB_PATH, SqliteStorage, Storage};

// Re-export segmenting types
pub use segmenting::{
    ParallelSegmenter, Segmenter, SentenceSegmenter, available_strategies, create_segmenter,
    segment,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
