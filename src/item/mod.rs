//! Item Model
//!
//! The [`Item`] is the only entity this crate persists. It is stored as a
//! [`Record`] of three string attributes:
//!
//! | attribute   | meaning                                          |
//! |-------------|--------------------------------------------------|
//! | `id`        | generated at creation, the lookup key            |
//! | `name`      | supplied by the caller, stored verbatim          |
//! | `createdAt` | UTC timestamp taken when the item was created    |
//!
//! The identifier and timestamp sources live in [`id`] and [`clock`] so the
//! hosting process can inject them.

pub mod clock;
pub mod id;

pub use clock::{Clock, SystemClock};
pub use id::{IdGenerator, UuidGenerator};

use crate::storage::{AttributeValue, Record};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

/// Attribute holding the item identifier.
pub const ATTR_ID: &str = "id";

/// Attribute holding the item name.
pub const ATTR_NAME: &str = "name";

/// Attribute holding the creation timestamp.
pub const ATTR_CREATED_AT: &str = "createdAt";

/// Errors raised when a stored record cannot be read back as an [`Item`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A required string attribute is absent
    #[error("record is missing attribute '{0}'")]
    MissingAttribute(&'static str),
}

/// A persisted item.
///
/// Serializes to the exact body returned by a successful fetch:
/// `{"id": ..., "name": ..., "createdAt": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl Item {
    /// Builds a new item stamped with `created_at`.
    pub fn new(id: String, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at: format_timestamp(created_at),
        }
    }

    /// Converts the item into its stored form.
    pub fn into_record(self) -> Record {
        let mut record = Record::with_capacity(3);
        record.insert(ATTR_ID.to_string(), AttributeValue::S(self.id));
        record.insert(ATTR_NAME.to_string(), AttributeValue::S(self.name));
        record.insert(
            ATTR_CREATED_AT.to_string(),
            AttributeValue::S(self.created_at),
        );
        record
    }

    /// Reads an item back from its stored form.
    pub fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            id: string_attr(record, ATTR_ID)?,
            name: string_attr(record, ATTR_NAME)?,
            created_at: string_attr(record, ATTR_CREATED_AT)?,
        })
    }
}

fn string_attr(record: &Record, attr: &'static str) -> Result<String, RecordError> {
    record
        .get(attr)
        .and_then(AttributeValue::as_s)
        .map(str::to_string)
        .ok_or(RecordError::MissingAttribute(attr))
}

/// Formats a timestamp as RFC 3339 in UTC with millisecond precision,
/// e.g. `2026-10-16T09:30:00.123Z`. The fixed width keeps values sortable.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
