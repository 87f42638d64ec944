//! Error types for panelize operations.
//!
//! This module provides the error hierarchy using `thiserror` for storage,
//! segmentation, I/O, validation and CLI command failures. Segmenting a
//! story never fails; [`SegmentingError`] only covers strategy lookup.

use thiserror::Error;

/// Result type alias for panelize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Storage-related errors (database operations).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Segmenter selection errors.
    #[error("segmenting error: {0}")]
    Segmenting(#[from] SegmentingError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Rejected user input or editing action.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Storage-specific errors for database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(String),

    /// Storage not initialized (init command not run).
    #[error("panelize not initialized. Run: panelize init")]
    NotInitialized,

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while selecting a segmentation strategy.
#[derive(Error, Debug)]
pub enum SegmentingError {
    /// Unknown segmentation strategy.
    #[error("unknown segmentation strategy: {name}")]
    UnknownStrategy {
        /// Name of the unknown strategy.
        name: String,
    },
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Story text is not valid UTF-8.
    #[error("invalid UTF-8 at byte offset {offset}")]
    InvalidUtf8 {
        /// Byte offset where invalid UTF-8 was found.
        offset: usize,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// Rejected input from the login form, key setup or the comic editor.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Login attempted with a blank username.
    #[error("username is required")]
    MissingUsername,

    /// Login attempted with a blank password.
    #[error("password is required")]
    MissingPassword,

    /// An operation needs a logged-in user.
    #[error("not logged in. Run: panelize login <username>")]
    NotLoggedIn,

    /// No API key was supplied or stored.
    #[error("API key is required")]
    MissingApiKey,

    /// API key does not have the expected shape.
    #[error("invalid API key: {reason}")]
    InvalidApiKey {
        /// Why the key was rejected.
        reason: String,
    },

    /// Story text is empty or whitespace.
    #[error("story is empty")]
    EmptyStory,

    /// The comic has no panels to work with.
    #[error("comic has no panels")]
    NoPanels,

    /// No panel with the given identifier.
    #[error("panel not found: {id}")]
    PanelNotFound {
        /// Panel identifier that was not found.
        id: String,
    },

    /// Index outside the valid range.
    #[error("{what} {index} out of range (len {len})")]
    OutOfRange {
        /// What the index refers to.
        what: &'static str,
        /// The rejected index.
        index: usize,
        /// Length of the indexed collection.
        len: usize,
    },

    /// Unknown art style name.
    #[error("unknown art style: {name}")]
    UnknownStyle {
        /// The rejected style name.
        name: String,
    },

    /// Unknown story genre name.
    #[error("unknown story genre: {name}")]
    UnknownGenre {
        /// The rejected genre name.
        name: String,
    },

    /// Unknown story length name.
    #[error("unknown story length: {name}")]
    UnknownLength {
        /// The rejected length name.
        name: String,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Missing required argument.
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),
}

// Implement From traits for standard library errors

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(StorageError::from(err))
    }
}

impl From<std::string::FromUtf8Error> for IoError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::InvalidUtf8 {
            offset: err.utf8_error().valid_up_to(),
        }
    }
}

impl From<std::str::Utf8Error> for IoError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8 {
            offset: err.valid_up_to(),
        }
    }
}
