//! Storage layer for panelize.
//!
//! Provides a local key-value store backed by `SQLite`. Values are JSON
//! documents under string keys; the editor session is persisted through
//! the helpers in [`session`].

pub mod schema;
pub mod session;
pub mod sqlite;
pub mod traits;

pub use schema::{CURRENT_SCHEMA_VERSION, SCHEMA_SQL};
pub use session::{
    API_KEY_KEY, COMIC_KEY, SESSION_KEYS, STORY_KEY, USER_KEY, clear_session, load_session,
    save_session,
};
pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageStats};

/// Default database path relative to the working directory.
pub const DEFAULT_DB_PATH: &str = ".panelize/panelize-state.db";
