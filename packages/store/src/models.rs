//! # Domain model for to-do items
//!
//! [`Item`] is the single record type stored by every [`crate::ItemStore`]
//! backend. It derives `Serialize` so handlers can return it as JSON directly,
//! and `sqlx::FromRow` so the SQLite backend can load it straight from the
//! `todos` table (whose columns keep the `sessionId` / `createdAt` spelling).
//!
//! | Field | JSON key | Column |
//! |-------|----------|--------|
//! | `id` | `id` | `id` |
//! | `owner` | `owner` | `sessionId` |
//! | `name` | `name` | `name` |
//! | `completed` | `completed` | `completed` |
//! | `created_at` | `createdAt` | `createdAt` |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A to-do item owned by one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Store-assigned identifier, unique within the store.
    pub id: i64,
    /// Owner id of the session that created the item. Never changes.
    #[sqlx(rename = "sessionId")]
    pub owner: String,
    pub name: String,
    pub completed: bool,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// A fresh, not yet completed item created now.
    pub fn new(id: i64, name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id,
            owner: owner.into(),
            name: name.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let item = Item::new(1, "buy milk", "u1");
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["owner"], "u1");
        assert_eq!(value["name"], "buy milk");
        assert_eq!(value["completed"], false);
        assert!(value["createdAt"].is_string());
        assert!(value.get("created_at").is_none());
    }
}
