//! # itemkv - Item Request Handlers over a Key-Value Table
//!
//! itemkv provides three independent, stateless request handlers that each
//! perform one operation against a key-value table of items:
//!
//! - [`CreateHandler`]: parses `{"name": ...}`, generates an id, stores the item
//! - [`GetHandler`]: returns the item for an id, or `404`
//! - [`DeleteHandler`]: removes the item for an id, always `200`
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                               itemkv                                    │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────────────────────┐  │
//! │  │ HTTP Server │───>│  Request    │───>│ Create / Get / Delete       │  │
//! │  │ (axum)      │    │  Adapter    │    │ Handler                     │  │
//! │  └─────────────┘    └─────────────┘    └──────────────┬──────────────┘  │
//! │                                                       │                 │
//! │                                                       ▼                 │
//! │  ┌─────────────┐    ┌──────────────────────────────────────────────┐   │
//! │  │ IdGenerator │    │       trait KeyValueStore (table, key)       │   │
//! │  │ Clock       │    │  ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ │   │
//! │  └─────────────┘    │  │Shard 0 │ │Shard 1 │ │Shard 2 │ │...N    │ │   │
//! │                     │  └────────┘ └────────┘ └────────┘ └────────┘ │   │
//! │                     │              MemoryStore                      │   │
//! │                     └──────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use itemkv::{CreateHandler, GetHandler, MemoryStore, Request};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let store = Arc::new(MemoryStore::with_table("items"));
//! let create = CreateHandler::new(Arc::clone(&store), "items");
//! let get = GetHandler::new(Arc::clone(&store), "items");
//!
//! let created = create.handle(Request::with_body(r#"{"name":"widget"}"#)).await;
//! assert_eq!(created.status_code, 201);
//!
//! let body: serde_json::Value = serde_json::from_str(&created.body).unwrap();
//! let fetched = get.handle(Request::with_id(body["id"].as_str().unwrap())).await;
//! assert_eq!(fetched.status_code, 200);
//! # });
//! ```
//!
//! ## Module Overview
//!
//! - [`handlers`]: the three handlers and the request/response contract
//! - [`storage`]: the storage collaborator trait and the in-memory store
//! - [`item`]: the item model, identifier generation and clock
//! - [`config`]: hosting process configuration
//! - [`server`]: HTTP hosting runtime
//!
//! ## Failure Handling
//!
//! Handlers never return errors to their caller. Every failure is logged
//! with its cause and answered with `500 {"error":"Failed to <verb> item"}`.
//! A missing item on fetch is not a failure and answers `404`.

pub mod config;
pub mod handlers;
pub mod item;
pub mod server;
pub mod storage;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigError};
pub use handlers::{CreateHandler, DeleteHandler, GetHandler, HandlerError, Request, Response};
pub use item::{Clock, IdGenerator, Item, SystemClock, UuidGenerator};
pub use server::{AppState, InvocationStats};
pub use storage::{KeyValueStore, MemoryStore, StorageError};

/// The default port the local server listens on
pub const DEFAULT_PORT: u16 = 3000;

/// The default host the local server binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Environment variable naming the item table
pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

/// Version of itemkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
