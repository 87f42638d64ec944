//! Storage trait definition.
//!
//! A string-keyed store of JSON values, shaped after browser local
//! storage, so the editor session can survive between runs.

use crate::error::{Result, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Trait for persistent key-value storage backends.
pub trait Storage: Send {
    /// Initializes storage (creates the schema if missing).
    ///
    /// Should be idempotent - safe to call multiple times.
    fn init(&mut self) -> Result<()>;

    /// Checks if storage is initialized.
    fn is_initialized(&self) -> Result<bool>;

    /// Deletes every item but keeps the schema.
    fn reset(&mut self) -> Result<()>;

    /// Stores a raw JSON value under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Returns the raw JSON value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Removes `key`. Returns whether it existed.
    fn remove_item(&mut self, key: &str) -> Result<bool>;

    /// Lists stored keys in sorted order.
    fn keys(&self) -> Result<Vec<String>>;

    /// Gets storage statistics.
    fn stats(&self) -> Result<StorageStats>;

    /// Serializes `value` to JSON and stores it under `key`.
    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value).map_err(StorageError::from)?;
        self.set_item(key, &json)
    }

    /// Loads and deserializes the value stored under `key`.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>>
    where
        Self: Sized,
    {
        match self.get_item(key)? {
            Some(json) => {
                let value = serde_json::from_str(&json).map_err(StorageError::from)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

/// Storage statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageStats {
    /// Number of stored items.
    pub item_count: usize,
    /// Total size of stored values in bytes.
    pub total_value_size: usize,
    /// Schema version.
    pub schema_version: u32,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}
