//! Request Handlers Module
//!
//! This module implements the three item handlers. Each one receives a
//! [`Request`], issues exactly one storage call, and always produces a
//! [`Response`]; failures never escape a handler.
//!
//! ## Architecture
//!
//! ```text
//! Hosting runtime
//!       │  Request { body, pathParameters }
//!       ▼
//! ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐
//! │ CreateHandler   │   │ GetHandler      │   │ DeleteHandler   │
//! │  parse body     │   │  read path id   │   │  read path id   │
//! │  generate id    │   │                 │   │                 │
//! └────────┬────────┘   └────────┬────────┘   └────────┬────────┘
//!          │ put                 │ get                 │ delete
//!          ▼                     ▼                     ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  KeyValueStore (table, key)                 │
//! └─────────────────────────────────────────────────────────────┘
//!       │
//!       ▼  Response { statusCode, body }
//! ```
//!
//! ## Responses
//!
//! | Handler | Outcome      | Status | Body                                       |
//! |---------|--------------|--------|--------------------------------------------|
//! | create  | stored       | 201    | `{"message":"Item created","id":...}`      |
//! | get     | found        | 200    | `{"id":...,"name":...,"createdAt":...}`    |
//! | get     | absent       | 404    | `{"error":"Item not found"}`               |
//! | delete  | always       | 200    | `{"message":"Item deleted","id":...}`      |
//! | any     | failure      | 500    | `{"error":"Failed to <verb> item"}`        |

pub mod create;
pub mod delete;
pub mod error;
pub mod get;

pub use create::CreateHandler;
pub use delete::DeleteHandler;
pub use error::HandlerError;
pub use get::GetHandler;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::collections::HashMap;
use tracing::error;

/// Path parameter carrying the item identifier.
pub const ID_PARAM: &str = "id";

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// An incoming invocation, as handed over by the hosting runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Raw JSON request body, if any
    #[serde(default)]
    pub body: Option<String>,

    /// Values captured from the request path, by parameter name
    #[serde(default, deserialize_with = "null_as_empty")]
    pub path_parameters: HashMap<String, String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Request {
    /// Creates a request carrying only a body.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::default()
        }
    }

    /// Creates a request carrying only an `id` path parameter.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self::default().with_path_parameter(ID_PARAM, id)
    }

    /// Adds a path parameter.
    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    /// Looks up a path parameter by name.
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters.get(name).map(String::as_str)
    }
}

/// The result of an invocation: an HTTP status and a JSON-encoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    /// Creates a response whose body is `payload` encoded as JSON.
    ///
    /// If the payload cannot be encoded the caller's `failure` message is
    /// answered instead, as a 500.
    pub fn json<T: Serialize>(status_code: u16, payload: &T, failure: &str) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self { status_code, body },
            Err(e) => {
                error!(error = %e, "Failed to encode response body");
                Self::error(STATUS_INTERNAL_ERROR, failure)
            }
        }
    }

    /// Creates a `{"error": message}` response.
    pub fn error(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: json!({ "error": message }).to_string(),
        }
    }

    /// Returns `true` for 5xx responses.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }
}

/// `{"message": ..., "id": ...}`
#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    message: &'a str,
    id: &'a str,
}
