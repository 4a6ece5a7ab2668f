//! # Cart Snapshot Repository
//!
//! Database operations for the persisted cart copy.
//!
//! ## Snapshot Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Snapshot Lifecycle                                  │
//! │                                                                         │
//! │  1. SESSION START                                                      │
//! │     └── load(session_key) → Some(payload) | None                       │
//! │                                                                         │
//! │  2. EVERY MUTATION                                                     │
//! │     └── save(session_key, payload) → upsert, last write wins           │
//! │                                                                         │
//! │  3. ORDER CONFIRMED                                                    │
//! │     └── delete(session_key) → idempotent erase                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The payload is opaque here. Serialization, parse-failure tolerance and
//! invariant re-normalization all belong to the engine.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;

/// Repository for cart snapshot database operations.
#[derive(Debug, Clone)]
pub struct CartSnapshotRepository {
    pool: SqlitePool,
}

impl CartSnapshotRepository {
    /// Creates a new CartSnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartSnapshotRepository { pool }
    }

    /// Writes the snapshot payload for a session (insert or replace).
    ///
    /// Called after every successful cart mutation; the previous payload
    /// for the session is overwritten.
    pub async fn save(&self, session_key: &str, payload: &str) -> StoreResult<()> {
        debug!(session_key = %session_key, bytes = payload.len(), "Saving cart snapshot");

        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO cart_snapshots (session_key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(session_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(session_key)
        .bind(payload)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Reads the snapshot payload for a session.
    ///
    /// ## Returns
    /// * `Ok(Some(payload))` - A snapshot exists
    /// * `Ok(None)` - No snapshot stored (fresh session)
    pub async fn load(&self, session_key: &str) -> StoreResult<Option<String>> {
        let payload: Option<String> = sqlx::query_scalar(
            r#"
            SELECT payload
            FROM cart_snapshots
            WHERE session_key = ?1
            "#,
        )
        .bind(session_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(payload)
    }

    /// Erases the stored snapshot for a session.
    ///
    /// Idempotent: deleting a missing row is not an error.
    pub async fn delete(&self, session_key: &str) -> StoreResult<()> {
        debug!(session_key = %session_key, "Deleting cart snapshot");

        sqlx::query(
            r#"
            DELETE FROM cart_snapshots
            WHERE session_key = ?1
            "#,
        )
        .bind(session_key)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts stored snapshots. For diagnostics.
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_snapshots")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_returns_none() {
        let db = test_db().await;

        let payload = db.snapshots().load("session-1").await.unwrap();
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let db = test_db().await;
        let repo = db.snapshots();

        repo.save("session-1", r#"[{"productId":"A","quantity":2}]"#)
            .await
            .unwrap();

        let payload = repo.load("session-1").await.unwrap();
        assert_eq!(
            payload.as_deref(),
            Some(r#"[{"productId":"A","quantity":2}]"#)
        );
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_payload() {
        let db = test_db().await;
        let repo = db.snapshots();

        repo.save("session-1", "[1]").await.unwrap();
        repo.save("session-1", "[2]").await.unwrap();

        let payload = repo.load("session-1").await.unwrap();
        assert_eq!(payload.as_deref(), Some("[2]"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let db = test_db().await;
        let repo = db.snapshots();

        repo.save("session-1", "[1]").await.unwrap();
        repo.save("session-2", "[2]").await.unwrap();

        assert_eq!(repo.load("session-1").await.unwrap().as_deref(), Some("[1]"));
        assert_eq!(repo.load("session-2").await.unwrap().as_deref(), Some("[2]"));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = test_db().await;
        let repo = db.snapshots();

        repo.save("session-1", "[1]").await.unwrap();
        repo.delete("session-1").await.unwrap();
        assert!(repo.load("session-1").await.unwrap().is_none());

        // Deleting again is not an error.
        repo.delete("session-1").await.unwrap();
    }
}
