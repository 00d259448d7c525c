//! Storage Client Abstraction
//!
//! The handlers never talk to a concrete database. They talk to a
//! [`KeyValueStore`]: an opaque key-value store addressed by table name
//! and key, offering exactly three primitive calls.
//!
//! ```text
//!   put(table, key, record)  ->  Ok(())            | Err(StorageError)
//!   get(table, key)          ->  Ok(Some(record))  | Ok(None) | Err(StorageError)
//!   delete(table, key)       ->  Ok(())            | Err(StorageError)
//! ```
//!
//! Absence of a record is `Ok(None)`, never an error. Deleting an absent
//! key is `Ok(())`.

use std::collections::HashMap;
use std::future::Future;
use thiserror::Error;

/// A typed attribute value.
///
/// Only string attributes are stored by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A string attribute
    S(String),
}

impl AttributeValue {
    /// Returns the string payload if this is a string attribute.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::S(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::S(s.to_string())
    }
}

/// A stored record: attribute name to typed value.
pub type Record = HashMap<String, AttributeValue>;

/// Errors reported by a storage collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The addressed table does not exist
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// The store could not be reached
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the call because of request rate
    #[error("request throttled")]
    Throttled,

    /// The caller is not permitted to perform the call
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Any other failure inside the store
    #[error("internal storage error: {0}")]
    Internal(String),
}

/// Result type for storage calls.
pub type StorageResult<T> = Result<T, StorageError>;

/// An opaque key-value store addressed by table name and key.
///
/// Implementations must be shareable across concurrent invocations; the
/// hosting process constructs one and hands an `Arc` of it to every handler.
pub trait KeyValueStore: Send + Sync {
    /// Stores `record` under `key`, replacing any existing record.
    fn put(
        &self,
        table: &str,
        key: &str,
        record: Record,
    ) -> impl Future<Output = StorageResult<()>> + Send;

    /// Fetches the record stored under `key`, or `None` if there is none.
    fn get(
        &self,
        table: &str,
        key: &str,
    ) -> impl Future<Output = StorageResult<Option<Record>>> + Send;

    /// Removes the record stored under `key`. Absence is not an error.
    fn delete(&self, table: &str, key: &str) -> impl Future<Output = StorageResult<()>> + Send;
}
