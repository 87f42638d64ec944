//! Database schema definitions.
//!
//! Contains the SQL schema and version queries for the panelize `SQLite` store.

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// SQL schema for initial database setup.
pub const SCHEMA_SQL: &str = r"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_info (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Local key-value items (JSON values)
CREATE TABLE IF NOT EXISTS items (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
";

/// SQL to check if schema is initialized.
pub const CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type='table' AND name='schema_info';
";

/// SQL to get schema version.
pub const GET_VERSION_SQL: &str = r"
SELECT value FROM schema_info WHERE key = 'version';
";

/// SQL to set schema version.
pub const SET_VERSION_SQL: &str = r"
INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?);
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version() {
        const _: () = assert!(CURRENT_SCHEMA_VERSION >= 1);
    }

    #[test]
    fn test_schema_creates_items_table() {
        assert!(SCHEMA_SQL.contains("CREATE TABLE IF NOT EXISTS items"));
        assert!(SCHEMA_SQL.contains("CREATE TABLE IF NOT EXISTS schema_info"));
    }

    #[test]
    fn test_version_queries_target_schema_info() {
        assert!(GET_VERSION_SQL.contains("schema_info"));
        assert!(SET_VERSION_SQL.contains("schema_info"));
    }
}
