//! Get Handler
//!
//! Looks up the item named by the `id` path parameter. A missing record is
//! an ordinary `404`, kept apart from storage failures which answer `500`.

use crate::handlers::{
    HandlerError, Request, Response, ID_PARAM, STATUS_INTERNAL_ERROR, STATUS_NOT_FOUND, STATUS_OK,
};
use crate::item::Item;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, error};

const NOT_FOUND_MESSAGE: &str = "Item not found";
const FAILURE_MESSAGE: &str = "Failed to fetch item";

/// Fetches single items by identifier.
pub struct GetHandler<S> {
    store: Arc<S>,
    table: Arc<str>,
}

impl<S> Clone for GetHandler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            table: Arc::clone(&self.table),
        }
    }
}

impl<S: KeyValueStore> GetHandler<S> {
    pub fn new(store: Arc<S>, table: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Serves one invocation.
    pub async fn handle(&self, request: Request) -> Response {
        match self.fetch(&request).await {
            Ok(Some(item)) => Response::json(STATUS_OK, &item, FAILURE_MESSAGE),
            Ok(None) => {
                debug!(
                    table = %self.table,
                    id = request.path_parameter(ID_PARAM).unwrap_or_default(),
                    "Item not found"
                );
                Response::error(STATUS_NOT_FOUND, NOT_FOUND_MESSAGE)
            }
            Err(e) => {
                error!(table = %self.table, kind = e.kind(), error = %e, "{}", FAILURE_MESSAGE);
                Response::error(STATUS_INTERNAL_ERROR, FAILURE_MESSAGE)
            }
        }
    }

    async fn fetch(&self, request: &Request) -> Result<Option<Item>, HandlerError> {
        let id = request
            .path_parameter(ID_PARAM)
            .ok_or(HandlerError::MissingPathParameter(ID_PARAM))?;

        match self.store.get(&self.table, id).await? {
            Some(record) => Ok(Some(Item::from_record(&record)?)),
            None => Ok(None),
        }
    }
}
