//! # Storage Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                             │
//! │                                                                     │
//! │  SQLite Error (sqlx::Error) ── or ── JSON error (serde_json)        │
//! │       │                                   │                         │
//! │       ▼                                   ▼                         │
//! │  StoreError (this module) ← adds slice/operation context            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  RegisterService: logged as a warning, never surfaced as a          │
//! │  blocking failure; in-memory state stays authoritative (see the     │
//! │  durability model in lib.rs)                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence operation errors.
///
/// These errors wrap sqlx/serde_json errors and provide additional context
/// for the warning logs.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A persisted slice could not be serialized or deserialized.
    ///
    /// ## When This Occurs
    /// - A hand-edited or truncated database value
    /// - A slice written by an incompatible future version
    ///
    /// Load paths treat this as "slice absent" and fall back to defaults.
    #[error("slice {slice} has an unreadable value: {source}")]
    BadSlice {
        slice: String,
        #[source]
        source: serde_json::Error,
    },

    /// Pool exhausted (all connections in use).
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Internal storage error.
    #[error("internal storage error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to StoreError.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("pool is closed".to_string()),
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
