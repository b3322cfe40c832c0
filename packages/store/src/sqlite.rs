//! # SQLite item store
//!
//! Durable [`ItemStore`] backed by a single `todos` table. The schema is created
//! idempotently when the store is opened:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS todos (
//!     id        INTEGER  PRIMARY KEY AUTOINCREMENT,
//!     sessionId TEXT     NOT NULL,
//!     name      TEXT     NOT NULL,
//!     completed BOOLEAN  NOT NULL DEFAULT 0,
//!     createdAt DATETIME NOT NULL
//! );
//! ```
//!
//! plus an index on `sessionId` so per-owner listing does not scan the table.
//!
//! Every method runs exactly one statement, i.e. one implicit transaction.
//! The pool is exposed through [`SqliteStore::pool`] so the session store can
//! live in the same database file.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use crate::error::StoreResult;
use crate::items::ItemStore;
use crate::models::Item;

/// SQLite-backed item store.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and ensure the schema exists.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(opts)
            .await?;

        tracing::info!(path = %path.display(), "Opened SQLite item store");
        Self::with_pool(pool).await
    }

    /// A private in-memory database, mainly for tests.
    pub async fn in_memory() -> StoreResult<Self> {
        // One connection that never expires, since every connection sees its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> StoreResult<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id        INTEGER  PRIMARY KEY AUTOINCREMENT,
                sessionId TEXT     NOT NULL,
                name      TEXT     NOT NULL,
                completed BOOLEAN  NOT NULL DEFAULT 0,
                createdAt DATETIME NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS sessionIdIndexOnTodos ON todos (sessionId ASC)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl ItemStore for SqliteStore {
    async fn list(&self, owner: &str) -> StoreResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            "SELECT id, sessionId, name, completed, createdAt FROM todos
             WHERE sessionId = ? ORDER BY id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn add(&self, name: &str, owner: &str) -> StoreResult<Item> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO todos (sessionId, name, completed, createdAt) VALUES (?, ?, ?, ?)",
        )
        .bind(owner)
        .bind(name)
        .bind(false)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Item {
            id: result.last_insert_rowid(),
            owner: owner.to_string(),
            name: name.to_string(),
            completed: false,
            created_at,
        })
    }

    async fn remove(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn complete(&self, id: i64, completed: bool) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE todos SET completed = ? WHERE id = ?")
            .bind(completed)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Closed SQLite item store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.add("kept", "u1").await.unwrap();

        store.migrate().await.unwrap();

        assert_eq!(store.list("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_owner_index_exists() {
        let store = SqliteStore::in_memory().await.unwrap();

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'sessionIdIndexOnTodos'",
        )
        .fetch_one(store.pool())
        .await
        .unwrap();

        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_round_trips_created_at() {
        let store = SqliteStore::in_memory().await.unwrap();
        let added = store.add("timestamped", "u1").await.unwrap();

        let listed = store.list("u1").await.unwrap();
        let drift = listed[0].created_at - added.created_at;
        assert!(drift.num_milliseconds().abs() < 1000);
        assert_eq!(listed[0].owner, "u1");
    }

    #[tokio::test]
    async fn test_autoincrement_does_not_reuse_ids() {
        let store = SqliteStore::in_memory().await.unwrap();

        let first = store.add("first", "u1").await.unwrap();
        assert!(store.remove(first.id).await.unwrap());
        let second = store.add("second", "u1").await.unwrap();

        assert!(second.id > first.id);
    }
}
