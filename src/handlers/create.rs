//! Create Handler
//!
//! Parses `{"name": ...}` from the request body, generates an identifier,
//! stamps the creation time and stores the new item.
//!
//! An unreadable body and a failed store call produce the same
//! `500 {"error":"Failed to create item"}` response; only the log tells
//! them apart.

use crate::handlers::{
    HandlerError, MessageBody, Request, Response, STATUS_CREATED, STATUS_INTERNAL_ERROR,
};
use crate::item::{Clock, IdGenerator, Item, SystemClock, UuidGenerator};
use crate::storage::KeyValueStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

const CREATED_MESSAGE: &str = "Item created";
const FAILURE_MESSAGE: &str = "Failed to create item";

/// Expected shape of the request body. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct CreateItemRequest {
    name: String,
}

/// Stores new items.
pub struct CreateHandler<S> {
    store: Arc<S>,
    table: Arc<str>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for CreateHandler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            table: Arc::clone(&self.table),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: KeyValueStore> CreateHandler<S> {
    /// Creates a handler writing to `table`, with UUID identifiers and the system clock.
    pub fn new(store: Arc<S>, table: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            table: table.into(),
            ids: Arc::new(UuidGenerator),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the identifier generator.
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Replaces the clock used for `createdAt`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Serves one invocation.
    pub async fn handle(&self, request: Request) -> Response {
        match self.create(request).await {
            Ok(id) => {
                info!(table = %self.table, id = %id, "Item created");
                Response::json(
                    STATUS_CREATED,
                    &MessageBody {
                        message: CREATED_MESSAGE,
                        id: &id,
                    },
                    FAILURE_MESSAGE,
                )
            }
            Err(e) => {
                error!(table = %self.table, kind = e.kind(), error = %e, "{}", FAILURE_MESSAGE);
                Response::error(STATUS_INTERNAL_ERROR, FAILURE_MESSAGE)
            }
        }
    }

    async fn create(&self, request: Request) -> Result<String, HandlerError> {
        let body = request.body.ok_or(HandlerError::MissingBody)?;
        let payload: CreateItemRequest = serde_json::from_str(&body)?;

        let id = self.ids.generate();
        let item = Item::new(id.clone(), payload.name, self.clock.now());

        self.store.put(&self.table, &id, item.into_record()).await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::{FailingStore, FixedClock, SequentialIds, TABLE};
    use crate::storage::{AttributeValue, MemoryStore, StorageError};
    use chrono::{DateTime, Utc};

    fn create_handler() -> (CreateHandler<MemoryStore>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_table(TABLE));
        let handler = CreateHandler::new(Arc::clone(&store), TABLE)
            .with_id_generator(Arc::new(SequentialIds::default()))
            .with_clock(Arc::new(FixedClock::at_noon()));
        (handler, store)
    }

    fn attr(store: &MemoryStore, id: &str, name: &str) -> Option<String> {
        store
            .get_record(TABLE, id)
            .unwrap()
            .and_then(|record| record.get(name).and_then(AttributeValue::as_s).map(String::from))
    }

    #[tokio::test]
    async fn test_create() {
        let (handler, store) = create_handler();

        let response = handler.handle(Request::with_body(r#"{"name":"widget"}"#)).await;
        assert_eq!(response.status_code, 201);
        assert_eq!(response.body, r#"{"message":"Item created","id":"item-1"}"#);

        assert_eq!(attr(&store, "item-1", "id").as_deref(), Some("item-1"));
        assert_eq!(attr(&store, "item-1", "name").as_deref(), Some("widget"));
        assert_eq!(
            attr(&store, "item-1", "createdAt").as_deref(),
            Some("2026-10-16T12:00:00.000Z")
        );
    }

    #[tokio::test]
    async fn test_each_create_gets_a_fresh_id() {
        let (handler, store) = create_handler();

        handler.handle(Request::with_body(r#"{"name":"a"}"#)).await;
        let response = handler.handle(Request::with_body(r#"{"name":"a"}"#)).await;

        assert_eq!(response.body, r#"{"message":"Item created","id":"item-2"}"#);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_created_at_comes_from_the_handler() {
        let (handler, store) = create_handler();

        let response = handler
            .handle(Request::with_body(
                r#"{"name":"widget","createdAt":"1999-01-01T00:00:00.000Z","extra":1}"#,
            ))
            .await;

        assert_eq!(response.status_code, 201);
        assert_eq!(
            attr(&store, "item-1", "createdAt").as_deref(),
            Some("2026-10-16T12:00:00.000Z")
        );
    }

    #[tokio::test]
    async fn test_system_clock_timestamp() {
        let store = Arc::new(MemoryStore::with_table(TABLE));
        let handler = CreateHandler::new(Arc::clone(&store), TABLE);

        let before = Utc::now();
        let response = handler.handle(Request::with_body(r#"{"name":"widget"}"#)).await;
        let after = Utc::now();

        assert_eq!(response.status_code, 201);
        let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        let id = body["id"].as_str().unwrap();

        let created_at = attr(&store, id, "createdAt").unwrap();
        let created_at = DateTime::parse_from_rfc3339(&created_at).unwrap();
        assert!(created_at >= before - chrono::TimeDelta::milliseconds(1));
        assert!(created_at <= after);
    }

    #[tokio::test]
    async fn test_malformed_bodies() {
        let (handler, store) = create_handler();

        let bodies = [
            Request::default(),
            Request::with_body("not json"),
            Request::with_body("null"),
            Request::with_body(r#"{"title":"widget"}"#),
            Request::with_body(r#"{"name":42}"#),
        ];

        for request in bodies {
            let response = handler.handle(request).await;
            assert_eq!(response.status_code, 500);
            assert_eq!(response.body, r#"{"error":"Failed to create item"}"#);
        }

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure() {
        let store = Arc::new(FailingStore::new(StorageError::Unavailable(
            "connection refused".into(),
        )));
        let handler = CreateHandler::new(Arc::clone(&store), TABLE);

        let response = handler.handle(Request::with_body(r#"{"name":"widget"}"#)).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, r#"{"error":"Failed to create item"}"#);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_never_reaches_storage() {
        let store = Arc::new(FailingStore::new(StorageError::Throttled));
        let handler = CreateHandler::new(Arc::clone(&store), TABLE);

        let response = handler.handle(Request::with_body("{")).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_table() {
        let store = Arc::new(MemoryStore::new());
        let handler = CreateHandler::new(store, "absent");

        let response = handler.handle(Request::with_body(r#"{"name":"widget"}"#)).await;
        assert_eq!(response.status_code, 500);
    }
}
