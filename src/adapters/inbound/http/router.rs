use axum::{
    Router,
    routing::{any, put},
};
use std::sync::Arc;

use super::handlers::{create_container, list_container, object_request};
use crate::ports::storage::ObjectBackend;

/// Application state shared by the backend handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn ObjectBackend>,
}

/// Create the backend router: `/<version>/<account>/<container>[/<object>]`
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/{version}/{account}/{container}",
            put(create_container).get(list_container),
        )
        .route(
            "/{version}/{account}/{container}/{*object}",
            any(object_request),
        )
        .with_state(state)
}
