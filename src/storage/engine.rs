//! Thread-Safe In-Memory Table Store
//!
//! This module implements [`MemoryStore`], an in-process stand-in for a
//! managed key-value table service. It backs the local hosting runtime and
//! the test suite.
//!
//! ## Design Decisions
//!
//! 1. **Sharded Locks**: Records are spread over multiple shards, each with its own lock.
//! 2. **Explicit Tables**: A table must be created before records can be stored in it.
//! 3. **No Panics**: A poisoned lock is reported as [`StorageError::Unavailable`].
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       MemoryStore                           │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐           │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │ Shard N │           │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ RwLock  │           │
//! │  │ HashMap │ │ HashMap │ │ HashMap │ │ HashMap │           │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A record's shard is chosen by hashing its table name together with its key,
//! so the same key in two tables may live in different shards.

use crate::storage::client::{KeyValueStore, Record, StorageError, StorageResult};
use std::collections::{HashMap, HashSet};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::trace;

/// Number of shards for the store.
const NUM_SHARDS: usize = 64;

/// Location of a record: the table it belongs to and its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TableKey {
    table: String,
    key: String,
}

impl TableKey {
    fn new(table: &str, key: &str) -> Self {
        Self {
            table: table.to_string(),
            key: key.to_string(),
        }
    }
}

/// A single shard containing a portion of the records of every table.
#[derive(Debug, Default)]
struct Shard {
    records: RwLock<HashMap<TableKey, Record>>,
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("storage lock poisoned".to_string())
}

/// An in-memory, sharded implementation of [`KeyValueStore`].
///
/// Wrap it in an `Arc` and share it across all handlers.
///
/// # Example
///
/// ```
/// use itemkv::storage::{AttributeValue, MemoryStore, Record};
///
/// let store = MemoryStore::new();
/// store.create_table("items");
///
/// let mut record = Record::new();
/// record.insert("id".to_string(), AttributeValue::from("abc"));
/// store.put_record("items", "abc", record).unwrap();
///
/// assert!(store.get_record("items", "abc").unwrap().is_some());
/// store.delete_record("items", "abc").unwrap();
/// assert!(store.get_record("items", "abc").unwrap().is_none());
/// ```
pub struct MemoryStore {
    /// Sharded storage for reduced lock contention
    shards: Vec<Shard>,

    /// Names of the tables that exist
    tables: RwLock<HashSet<String>>,

    /// Statistics: number of records currently stored
    key_count: AtomicU64,

    /// Statistics: total get operations
    get_count: AtomicU64,

    /// Statistics: total put operations
    put_count: AtomicU64,

    /// Statistics: total delete operations
    del_count: AtomicU64,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("shards", &self.shards.len())
            .field("key_count", &self.key_count.load(Ordering::Relaxed))
            .field("get_count", &self.get_count.load(Ordering::Relaxed))
            .field("put_count", &self.put_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store with no tables.
    pub fn new() -> Self {
        let shards = (0..NUM_SHARDS).map(|_| Shard::default()).collect();

        Self {
            shards,
            tables: RwLock::new(HashSet::new()),
            key_count: AtomicU64::new(0),
            get_count: AtomicU64::new(0),
            put_count: AtomicU64::new(0),
            del_count: AtomicU64::new(0),
        }
    }

    /// Creates a store that already contains the given table.
    pub fn with_table(table: &str) -> Self {
        let store = Self::new();
        store.create_table(table);
        store
    }

    /// Creates a table. Returns `false` if it already existed.
    pub fn create_table(&self, table: &str) -> bool {
        match self.tables.write() {
            Ok(mut tables) => tables.insert(table.to_string()),
            Err(poisoned) => poisoned.into_inner().insert(table.to_string()),
        }
    }

    fn ensure_table(&self, table: &str) -> StorageResult<()> {
        let tables = self.tables.read().map_err(poisoned)?;
        if tables.contains(table) {
            Ok(())
        } else {
            Err(StorageError::TableNotFound(table.to_string()))
        }
    }

    /// Determines which shard a record belongs to.
    #[inline]
    fn shard_index(&self, location: &TableKey) -> usize {
        let mut hasher = DefaultHasher::new();
        location.hash(&mut hasher);
        (hasher.finish() as usize) % NUM_SHARDS
    }

    /// Gets the shard for a given record location.
    #[inline]
    fn get_shard(&self, location: &TableKey) -> &Shard {
        &self.shards[self.shard_index(location)]
    }

    /// Stores a record, overwriting any record already under that key.
    pub fn put_record(&self, table: &str, key: &str, record: Record) -> StorageResult<()> {
        self.put_count.fetch_add(1, Ordering::Relaxed);
        self.ensure_table(table)?;

        let location = TableKey::new(table, key);
        let shard = self.get_shard(&location);
        let mut records = shard.records.write().map_err(poisoned)?;

        if records.insert(location, record).is_none() {
            self.key_count.fetch_add(1, Ordering::Relaxed);
        }

        trace!(table, key, "Stored record");
        Ok(())
    }

    /// Returns a copy of the record stored under `key`, if any.
    pub fn get_record(&self, table: &str, key: &str) -> StorageResult<Option<Record>> {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        self.ensure_table(table)?;

        let location = TableKey::new(table, key);
        let shard = self.get_shard(&location);
        let records = shard.records.read().map_err(poisoned)?;

        Ok(records.get(&location).cloned())
    }

    /// Removes the record stored under `key`.
    ///
    /// Succeeds whether or not the record existed.
    pub fn delete_record(&self, table: &str, key: &str) -> StorageResult<()> {
        self.del_count.fetch_add(1, Ordering::Relaxed);
        self.ensure_table(table)?;

        let location = TableKey::new(table, key);
        let shard = self.get_shard(&location);
        let mut records = shard.records.write().map_err(poisoned)?;

        if records.remove(&location).is_some() {
            self.key_count.fetch_sub(1, Ordering::Relaxed);
            trace!(table, key, "Deleted record");
        }

        Ok(())
    }

    /// Returns the number of records stored across all tables.
    pub fn len(&self) -> u64 {
        self.key_count.load(Ordering::Relaxed)
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns operation statistics.
    pub fn stats(&self) -> StorageStats {
        StorageStats {
            keys: self.key_count.load(Ordering::Relaxed),
            get_ops: self.get_count.load(Ordering::Relaxed),
            put_ops: self.put_count.load(Ordering::Relaxed),
            del_ops: self.del_count.load(Ordering::Relaxed),
        }
    }
}

impl KeyValueStore for MemoryStore {
    async fn put(&self, table: &str, key: &str, record: Record) -> StorageResult<()> {
        self.put_record(table, key, record)
    }

    async fn get(&self, table: &str, key: &str) -> StorageResult<Option<Record>> {
        self.get_record(table, key)
    }

    async fn delete(&self, table: &str, key: &str) -> StorageResult<()> {
        self.delete_record(table, key)
    }
}

/// Store statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of records currently stored
    pub keys: u64,
    /// Total get operations
    pub get_ops: u64,
    /// Total put operations
    pub put_ops: u64,
    /// Total delete operations
    pub del_ops: u64,
}
