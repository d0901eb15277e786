use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use http::header::{ETAG, LAST_MODIFIED};

use crate::{
    adapters::inbound::http::{middleware::DESTINATION, router::AppState},
    domain::errors::{StorageError, StorageResult},
    ports::storage::{ObjectInfo, ObjectLocation},
};

use super::{error_response, finish};

/// Path parameters of an object route
pub type ObjectPathParams = (String, String, String, String);

/// Handle every method on an object path.
///
/// COPY is not a standard method, so the route is registered with `any`
/// and the method is dispatched here.
pub async fn object_request(
    State(app_state): State<AppState>,
    Path((_version, account, container, object)): Path<ObjectPathParams>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let location = ObjectLocation::new(account, container, object);

    let response = match method.as_str() {
        "GET" => get_object(&app_state, &location, false).await,
        "HEAD" => get_object(&app_state, &location, true).await,
        "PUT" => put_object(&app_state, &location, body).await,
        "DELETE" => delete_object(&app_state, &location).await,
        "COPY" => copy_object(&app_state, &location, &headers).await,
        _ => Ok(StatusCode::METHOD_NOT_ALLOWED.into_response()),
    };

    finish(response.unwrap_or_else(error_response))
}

fn object_headers(info: &ObjectInfo) -> [(http::HeaderName, String); 2] {
    [
        (ETAG, info.hash.clone()),
        (
            LAST_MODIFIED,
            info.last_modified
                .format("%a, %d %b %Y %H:%M:%S GMT")
                .to_string(),
        ),
    ]
}

async fn get_object(
    app_state: &AppState,
    location: &ObjectLocation,
    head_only: bool,
) -> StorageResult<Response> {
    let stored = app_state.backend.get_object(location).await?;
    let headers = object_headers(&stored.info);

    if head_only {
        Ok((StatusCode::OK, headers).into_response())
    } else {
        Ok((StatusCode::OK, headers, Body::from(stored.data)).into_response())
    }
}

async fn put_object(
    app_state: &AppState,
    location: &ObjectLocation,
    body: Bytes,
) -> StorageResult<Response> {
    let info = app_state.backend.put_object(location, body).await?;
    Ok((StatusCode::CREATED, object_headers(&info)).into_response())
}

async fn delete_object(app_state: &AppState, location: &ObjectLocation) -> StorageResult<Response> {
    app_state.backend.delete_object(location).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn copy_object(
    app_state: &AppState,
    source: &ObjectLocation,
    headers: &HeaderMap,
) -> StorageResult<Response> {
    let (container, object) = parse_destination(headers)?;
    let destination = source.in_container(container, object);

    let info = app_state.backend.copy_object(source, &destination).await?;
    Ok((StatusCode::CREATED, object_headers(&info)).into_response())
}

/// Split a `Destination` header into container and object.
///
/// The header may carry a leading `/`. The first literal `/` separates the
/// container from the object and each side is percent-decoded afterwards, so
/// an encoded `%2F` in the container never moves that boundary.
pub fn parse_destination(headers: &HeaderMap) -> StorageResult<(String, String)> {
    let raw = headers
        .get(DESTINATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let invalid = || StorageError::InvalidDestination {
        destination: raw.to_string(),
    };

    let trimmed = raw.strip_prefix('/').unwrap_or(raw);
    let (container, object) = trimmed
        .split_once('/')
        .filter(|(container, object)| !container.is_empty() && !object.is_empty())
        .ok_or_else(invalid)?;

    let container = urlencoding::decode(container).map_err(|_| invalid())?;
    let object = urlencoding::decode(object).map_err(|_| invalid())?;
    Ok((container.into_owned(), object.into_owned()))
}
