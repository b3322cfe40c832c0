//! # Store crate: persistence for to-do items
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`items`] | The [`ItemStore`] capability and the [`Items`] backend selector |
//! | [`models`] | The [`Item`] record |
//! | [`error`] | [`StoreError`] |
//!
//! Backends: [`MemoryStore`] (process-local map) and [`SqliteStore`] (durable table).

pub mod error;
pub mod items;
pub mod models;

mod memory;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use items::{ItemStore, Items};
pub use memory::MemoryStore;
pub use models::Item;
pub use sqlite::SqliteStore;
