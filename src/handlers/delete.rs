//! Delete Handler
//!
//! Removes the item named by the `id` path parameter. Deleting an item that
//! does not exist still answers `200`.

use crate::handlers::{
    HandlerError, MessageBody, Request, Response, ID_PARAM, STATUS_INTERNAL_ERROR, STATUS_OK,
};
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tracing::{error, info};

const DELETED_MESSAGE: &str = "Item deleted";
const FAILURE_MESSAGE: &str = "Failed to delete item";

/// Removes single items by identifier.
pub struct DeleteHandler<S> {
    store: Arc<S>,
    table: Arc<str>,
}

impl<S> Clone for DeleteHandler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            table: Arc::clone(&self.table),
        }
    }
}

impl<S: KeyValueStore> DeleteHandler<S> {
    pub fn new(store: Arc<S>, table: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// Serves one invocation.
    pub async fn handle(&self, request: Request) -> Response {
        match self.delete(&request).await {
            Ok(id) => {
                info!(table = %self.table, id, "Item deleted");
                Response::json(
                    STATUS_OK,
                    &MessageBody {
                        message: DELETED_MESSAGE,
                        id,
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

    async fn delete<'r>(&self, request: &'r Request) -> Result<&'r str, HandlerError> {
        let id = request
            .path_parameter(ID_PARAM)
            .ok_or(HandlerError::MissingPathParameter(ID_PARAM))?;

        self.store.delete(&self.table, id).await?;
        Ok(id)
    }
}
