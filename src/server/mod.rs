//! Local Hosting Runtime
//!
//! The handlers know nothing about HTTP. This module is the thin runtime
//! that receives HTTP requests, invokes the matching handler, and relays
//! its response.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 axum Router (TraceLayer)                    │
//! │                                                             │
//! │  POST   /items        ──> CreateHandler                     │
//! │  GET    /items/{id}   ──> GetHandler                        │
//! │  DELETE /items/{id}   ──> DeleteHandler                     │
//! └──────────────────────────────┬──────────────────────────────┘
//!                                │
//!                                ▼
//!                  Arc<S: KeyValueStore> (one per process)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use itemkv::server::{serve, AppState};
//! use itemkv::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::with_table("items"));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! serve(listener, AppState::new(store, "items"), std::future::pending::<()>()).await?;
//! ```

pub mod routes;

// Re-export commonly used types
pub use routes::{router, serve, AppState, InvocationStats};
