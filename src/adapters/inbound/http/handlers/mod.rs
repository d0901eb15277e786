pub mod container_handlers;
pub mod object_handlers;

pub use container_handlers::*;
pub use object_handlers::*;

use axum::response::{IntoResponse, Response};
use http::{HeaderName, HeaderValue, StatusCode};
use uuid::Uuid;

use crate::domain::errors::StorageError;

/// Transaction id attached to every backend response
pub const X_TRANS_ID: HeaderName = HeaderName::from_static("x-trans-id");

/// Plain-text error response for a storage failure
pub fn error_response(err: StorageError) -> Response {
    let message = err.to_string();
    let status = StatusCode::from(err);
    (status, message).into_response()
}

/// Stamp a response with a fresh transaction id
pub fn finish(mut response: Response) -> Response {
    let trans_id = format!("tx{}", Uuid::new_v4().simple());
    if let Ok(value) = HeaderValue::from_str(&trans_id) {
        response.headers_mut().insert(X_TRANS_ID, value);
    }
    response
}
