//! HTTP Adapter for the Item Handlers
//!
//! Turns HTTP requests into handler [`Request`]s and handler [`Response`]s
//! back into HTTP responses. The adapter adds nothing of its own: status
//! and body are passed through verbatim.

use crate::handlers::{CreateHandler, DeleteHandler, GetHandler, Request, Response};
use crate::storage::KeyValueStore;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Statistics for handler invocations
#[derive(Debug, Default)]
pub struct InvocationStats {
    /// Total invocations served
    pub invocations: AtomicU64,
    /// Invocations answered with a 4xx status
    pub client_errors: AtomicU64,
    /// Invocations answered with a 5xx status
    pub server_errors: AtomicU64,
}

impl InvocationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, response: &Response) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        if response.is_server_error() {
            self.server_errors.fetch_add(1, Ordering::Relaxed);
        } else if (400..500).contains(&response.status_code) {
            self.client_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    pub fn client_errors(&self) -> u64 {
        self.client_errors.load(Ordering::Relaxed)
    }

    pub fn server_errors(&self) -> u64 {
        self.server_errors.load(Ordering::Relaxed)
    }
}

/// Everything the routes need, built once by the hosting process.
pub struct AppState<S> {
    pub create: CreateHandler<S>,
    pub get: GetHandler<S>,
    pub delete: DeleteHandler<S>,
    pub stats: Arc<InvocationStats>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            create: self.create.clone(),
            get: self.get.clone(),
            delete: self.delete.clone(),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<S: KeyValueStore> AppState<S> {
    /// Wires all three handlers to the same store and table.
    pub fn new(store: Arc<S>, table: &str) -> Self {
        Self::from_handlers(
            CreateHandler::new(Arc::clone(&store), table),
            GetHandler::new(Arc::clone(&store), table),
            DeleteHandler::new(store, table),
        )
    }

    pub fn from_handlers(
        create: CreateHandler<S>,
        get: GetHandler<S>,
        delete: DeleteHandler<S>,
    ) -> Self {
        Self {
            create,
            get,
            delete,
            stats: Arc::new(InvocationStats::new()),
        }
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}

/// Builds the item routes:
///
/// - `POST /items`
/// - `GET /items/{id}`
/// - `DELETE /items/{id}`
pub fn router<S: KeyValueStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/items", post(create_item::<S>))
        .route("/items/{id}", get(get_item::<S>).delete(delete_item::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the routes on `listener` until `shutdown` resolves.
pub async fn serve<S, F>(listener: TcpListener, state: AppState<S>, shutdown: F) -> std::io::Result<()>
where
    S: KeyValueStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// An empty body counts as no body; invalid UTF-8 is kept lossily so it fails JSON parsing.
fn body_text(body: &Bytes) -> Option<String> {
    if body.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(body).into_owned())
    }
}

/// A body that could not be read (too large, aborted) is handed over as no body.
fn readable_body(body: Result<Bytes, BytesRejection>) -> Option<String> {
    match body {
        Ok(body) => body_text(&body),
        Err(rejection) => {
            warn!(error = %rejection, "Request body could not be read");
            None
        }
    }
}

/// A path that cannot be decoded (e.g. invalid UTF-8) is handed over without parameters.
fn readable_path(
    path: Result<Path<HashMap<String, String>>, PathRejection>,
) -> HashMap<String, String> {
    match path {
        Ok(Path(path_parameters)) => path_parameters,
        Err(rejection) => {
            warn!(error = %rejection, "Request path could not be decoded");
            HashMap::new()
        }
    }
}

async fn create_item<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let request = Request {
        body: readable_body(body),
        path_parameters: HashMap::new(),
    };
    let response = state.create.handle(request).await;
    state.stats.record(&response);
    response
}

async fn get_item<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    path: Result<Path<HashMap<String, String>>, PathRejection>,
) -> Response {
    let request = Request {
        body: None,
        path_parameters: readable_path(path),
    };
    let response = state.get.handle(request).await;
    state.stats.record(&response);
    response
}

async fn delete_item<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    path: Result<Path<HashMap<String, String>>, PathRejection>,
) -> Response {
    let request = Request {
        body: None,
        path_parameters: readable_path(path),
    };
    let response = state.delete.handle(request).await;
    state.stats.record(&response);
    response
}
