//! # Item store: the persistence capability behind the to-do API
//!
//! All reads and writes of to-do items go through the [`ItemStore`] trait, so the
//! HTTP layer works unchanged against a transient in-memory map
//! ([`crate::MemoryStore`]) or a durable SQLite table ([`crate::SqliteStore`]).
//!
//! ## [`ItemStore`] trait
//!
//! | Method | Description |
//! |--------|-------------|
//! | `list` | Every item owned by `owner`, in ascending id order. |
//! | `add` | Creates an uncompleted item with a fresh id and returns it. |
//! | `remove` | Deletes by id; `true` iff a row was deleted. |
//! | `complete` | Sets the completed flag by id; `true` iff the item exists. |
//! | `close` | Releases the backing resources. |
//!
//! `remove` and `complete` address items by id alone and do not check the
//! owner. Callers that need ownership checks must do them before calling.
//!
//! ## Backend selection
//!
//! [`Items`] picks one backend at construction time and forwards every call
//! to it. It is cheap to clone; clones share the same backing store.

use std::future::Future;
use std::path::Path;

use crate::error::StoreResult;
use crate::memory::MemoryStore;
use crate::models::Item;
use crate::sqlite::SqliteStore;

/// Async persistence capability for to-do items.
pub trait ItemStore {
    fn list(&self, owner: &str) -> impl Future<Output = StoreResult<Vec<Item>>> + Send;
    fn add(&self, name: &str, owner: &str) -> impl Future<Output = StoreResult<Item>> + Send;
    fn remove(&self, id: i64) -> impl Future<Output = StoreResult<bool>> + Send;
    fn complete(&self, id: i64, completed: bool)
        -> impl Future<Output = StoreResult<bool>> + Send;
    fn close(&self) -> impl Future<Output = ()> + Send;
}

/// The item store chosen at startup.
#[derive(Clone, Debug)]
pub enum Items {
    Memory(MemoryStore),
    Sqlite(SqliteStore),
}

impl Items {
    /// Transient store; contents are lost when the process exits.
    pub fn memory() -> Self {
        Items::Memory(MemoryStore::new())
    }

    /// Durable store backed by the SQLite database at `path`.
    pub async fn sqlite(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Items::Sqlite(SqliteStore::open(path).await?))
    }

    /// Short backend name for logging.
    pub fn backend(&self) -> &'static str {
        match self {
            Items::Memory(_) => "memory",
            Items::Sqlite(_) => "sqlite",
        }
    }
}

impl ItemStore for Items {
    async fn list(&self, owner: &str) -> StoreResult<Vec<Item>> {
        match self {
            Items::Memory(store) => store.list(owner).await,
            Items::Sqlite(store) => store.list(owner).await,
        }
    }

    async fn add(&self, name: &str, owner: &str) -> StoreResult<Item> {
        match self {
            Items::Memory(store) => store.add(name, owner).await,
            Items::Sqlite(store) => store.add(name, owner).await,
        }
    }

    async fn remove(&self, id: i64) -> StoreResult<bool> {
        match self {
            Items::Memory(store) => store.remove(id).await,
            Items::Sqlite(store) => store.remove(id).await,
        }
    }

    async fn complete(&self, id: i64, completed: bool) -> StoreResult<bool> {
        match self {
            Items::Memory(store) => store.complete(id, completed).await,
            Items::Sqlite(store) => store.complete(id, completed).await,
        }
    }

    async fn close(&self) {
        match self {
            Items::Memory(store) => store.close().await,
            Items::Sqlite(store) => store.close().await,
        }
    }
}
