//! # State Slice Store
//!
//! The persistence adapter: one get/set pair per named state slice, each
//! slice independently serialized as a whole JSON value on every mutation.
//!
//! ## Storage Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  state_slices                                                       │
//! │  ┌────────────────┬──────────────────────────────┬────────────────┐ │
//! │  │ slice (PK)     │ value (whole JSON document)  │ updated_at     │ │
//! │  ├────────────────┼──────────────────────────────┼────────────────┤ │
//! │  │ services       │ [{"id":"...","name":...}]    │ 2024-05-01T... │ │
//! │  │ currentSales   │ [{"id":"...","lines":...}]   │ 2024-05-01T... │ │
//! │  │ isRegisterOpen │ true                         │ 2024-05-01T... │ │
//! │  │ adminCode      │ "1234"                       │ 2024-05-01T... │ │
//! │  └────────────────┴──────────────────────────────┴────────────────┘ │
//! │                                                                     │
//! │  save = UPSERT of the whole value; load = SELECT + JSON parse.      │
//! │  No partial updates, no per-row entity storage.                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Slice Names
// =============================================================================

/// The named state slices the register persists.
///
/// Names double as primary keys in `state_slices`; they are part of the
/// stored format and must never be renamed casually.
pub mod slice {
    pub const SERVICES: &str = "services";
    pub const PRODUCTS: &str = "products";
    pub const EMPLOYEES: &str = "employees";
    pub const CURRENT_SALES: &str = "currentSales";
    pub const SALES_HISTORY: &str = "salesHistory";
    pub const DAILY_CLOSINGS: &str = "dailyClosings";
    pub const IS_REGISTER_OPEN: &str = "isRegisterOpen";
    pub const ADMIN_CODE: &str = "adminCode";
}

// =============================================================================
// Slice Store
// =============================================================================

/// Persistence adapter over the `state_slices` table.
#[derive(Debug, Clone)]
pub struct SliceStore {
    pool: SqlitePool,
}

impl SliceStore {
    /// Creates a new SliceStore.
    pub fn new(pool: SqlitePool) -> Self {
        SliceStore { pool }
    }

    /// Loads one slice, deserializing the whole stored value.
    ///
    /// ## Returns
    /// - `Ok(Some(value))` - slice present and readable
    /// - `Ok(None)` - slice never written
    /// - `Err(StoreError::BadSlice)` - slice present but unreadable; load
    ///   paths treat this the same as absent (default + warning)
    pub async fn load<T: DeserializeOwned>(&self, name: &str) -> StoreResult<Option<T>> {
        let stored: Option<String> =
            sqlx::query_scalar("SELECT value FROM state_slices WHERE slice = ?1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        match stored {
            Some(json) => {
                let value = serde_json::from_str(&json).map_err(|source| StoreError::BadSlice {
                    slice: name.to_string(),
                    source,
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Saves one slice, replacing the whole stored value.
    pub async fn save<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::BadSlice {
            slice: name.to_string(),
            source,
        })?;

        debug!(slice = name, bytes = json.len(), "Saving state slice");

        sqlx::query(
            "INSERT INTO state_slices (slice, value, updated_at) VALUES (?1, ?2, ?3) \
             ON CONFLICT(slice) DO UPDATE SET value = excluded.value, \
             updated_at = excluded.updated_at",
        )
        .bind(name)
        .bind(json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};

    async fn store() -> SliceStore {
        Store::new(StoreConfig::in_memory()).await.unwrap().slices()
    }

    #[tokio::test]
    async fn test_load_absent_slice_is_none() {
        let slices = store().await;
        let loaded: Option<Vec<String>> = slices.load(slice::SERVICES).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let slices = store().await;

        slices
            .save(slice::EMPLOYEES, &vec!["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        let loaded: Option<Vec<String>> = slices.load(slice::EMPLOYEES).await.unwrap();
        assert_eq!(loaded, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[tokio::test]
    async fn test_save_replaces_whole_value() {
        let slices = store().await;

        slices.save(slice::IS_REGISTER_OPEN, &true).await.unwrap();
        slices.save(slice::IS_REGISTER_OPEN, &false).await.unwrap();

        let loaded: Option<bool> = slices.load(slice::IS_REGISTER_OPEN).await.unwrap();
        assert_eq!(loaded, Some(false));
    }

    #[tokio::test]
    async fn test_unreadable_slice_is_bad_slice_error() {
        let slices = store().await;

        // Simulate a corrupted value written by something else
        sqlx::query(
            "INSERT INTO state_slices (slice, value, updated_at) VALUES ('adminCode', '{oops', '')",
        )
        .execute(&slices.pool)
        .await
        .unwrap();

        let err = slices.load::<String>(slice::ADMIN_CODE).await.unwrap_err();
        assert!(matches!(err, StoreError::BadSlice { .. }));
    }

    #[tokio::test]
    async fn test_string_slice_round_trips() {
        let slices = store().await;
        slices.save(slice::ADMIN_CODE, "ab12").await.unwrap();
        let loaded: Option<String> = slices.load(slice::ADMIN_CODE).await.unwrap();
        assert_eq!(loaded.as_deref(), Some("ab12"));
    }
}
