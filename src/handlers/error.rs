//! Handler failure taxonomy.
//!
//! Every handler funnels its failures through [`HandlerError`] so the
//! boundary can log the precise cause while returning a generic body.
//! Absence of a record is not an error; it never appears here.

use crate::item::RecordError;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur while serving a single invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The request carried no body
    #[error("request body is missing")]
    MissingBody,

    /// The body is not JSON or lacks a required field
    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    /// A required path parameter was not supplied
    #[error("missing path parameter '{0}'")]
    MissingPathParameter(&'static str),

    /// The storage collaborator failed
    #[error("storage call failed: {0}")]
    Storage(#[from] StorageError),

    /// A stored record could not be mapped back to an item
    #[error("stored record is unreadable: {0}")]
    Record(#[from] RecordError),
}

impl HandlerError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::MissingBody
            | HandlerError::MalformedBody(_)
            | HandlerError::MissingPathParameter(_) => "invalid_request",
            HandlerError::Storage(_) => "storage",
            HandlerError::Record(_) => "corrupt_record",
        }
    }
}
