use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::StoreResult;
use crate::items::ItemStore;
use crate::models::Item;

/// In-memory ItemStore for tests and throwaway deployments.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    items: HashMap<i64, Item>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every mutation is a single map operation, so a poisoned map is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ItemStore for MemoryStore {
    async fn list(&self, owner: &str) -> StoreResult<Vec<Item>> {
        let mut items: Vec<Item> = self
            .lock()
            .items
            .values()
            .filter(|item| item.owner == owner)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn add(&self, name: &str, owner: &str) -> StoreResult<Item> {
        let mut inner = self.lock();
        inner.last_id += 1;
        let item = Item::new(inner.last_id, name, owner);
        inner.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn remove(&self, id: i64) -> StoreResult<bool> {
        Ok(self.lock().items.remove(&id).is_some())
    }

    async fn complete(&self, id: i64, completed: bool) -> StoreResult<bool> {
        match self.lock().items.get_mut(&id) {
            Some(item) => {
                item.completed = completed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn close(&self) {}
}
