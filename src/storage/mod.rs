//! Storage Module
//!
//! This module defines the storage collaborator the handlers depend on and
//! ships an in-memory implementation of it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ CreateHandler / GetHandler / │
//! │ DeleteHandler                │
//! └──────────────┬───────────────┘
//!                │ put / get / delete (table, key)
//!                ▼
//! ┌──────────────────────────────┐
//! │   trait KeyValueStore        │
//! └──────────────┬───────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────┐
//! │   MemoryStore (64 shards)    │
//! └──────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use itemkv::storage::{AttributeValue, KeyValueStore, MemoryStore, Record};
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::with_table("items");
//!
//! let mut record = Record::new();
//! record.insert("name".to_string(), AttributeValue::from("widget"));
//! store.put("items", "42", record).await.unwrap();
//!
//! let fetched = store.get("items", "42").await.unwrap();
//! assert!(fetched.is_some());
//! # });
//! ```

pub mod client;
pub mod engine;

// Re-export commonly used types
pub use client::{AttributeValue, KeyValueStore, Record, StorageError, StorageResult};
pub use engine::{MemoryStore, StorageStats};
