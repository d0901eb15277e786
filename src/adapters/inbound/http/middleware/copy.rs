use axum::body::Body;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use http::{
    HeaderMap, HeaderName, HeaderValue, Method, Request, Response, StatusCode,
    header::{CONTENT_LENGTH, TRANSFER_ENCODING},
    request::Parts,
};
use tower::{BoxError, Service, ServiceExt};

use crate::domain::{
    errors::{UndeleteError, UndeleteResult},
    models::TrashDestination,
};

/// Header naming the `<container>/<object>` target of a COPY request
pub const DESTINATION: HeaderName = HeaderName::from_static("destination");

/// Result of a copy sub-request, with the body fully drained
#[derive(Debug, Clone)]
pub struct CopyOutcome {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Issues object COPY sub-requests through a backend service
#[derive(Debug, Clone)]
pub struct CopyContext<S> {
    service: S,
}

impl<S> CopyContext<S>
where
    S: Service<Request<Body>, Response = Response<Body>>,
    S::Error: Into<BoxError>,
{
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Copy the object addressed by `parts` to `destination`.
    ///
    /// `parts` is never modified; the sub-request is built from a clone of
    /// it. The backend is called exactly once and its status code is not
    /// interpreted here.
    pub async fn copy(
        &mut self,
        parts: &Parts,
        destination: &TrashDestination,
    ) -> UndeleteResult<CopyOutcome> {
        let request = copy_request(parts, destination)?;

        let service = self
            .service
            .ready()
            .await
            .map_err(|e| UndeleteError::Dispatch(e.into()))?;
        let response = service
            .call(request)
            .await
            .map_err(|e| UndeleteError::Dispatch(e.into()))?;

        let (parts, body) = response.into_parts();
        let body = drain(body).await?;

        Ok(CopyOutcome {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }
}

fn copy_method() -> UndeleteResult<Method> {
    Method::from_bytes(b"COPY").map_err(|e| UndeleteError::Request(e.into()))
}

fn copy_request(parts: &Parts, destination: &TrashDestination) -> UndeleteResult<Request<Body>> {
    let target = destination.header_value();
    let target = HeaderValue::from_str(&target)
        .map_err(|_| UndeleteError::InvalidDestination { destination: target })?;

    let mut request = Request::builder()
        .method(copy_method()?)
        .uri(parts.uri.clone())
        .version(parts.version)
        .body(Body::empty())?;

    *request.headers_mut() = parts.headers.clone();
    *request.extensions_mut() = parts.extensions.clone();

    let headers = request.headers_mut();
    headers.remove(CONTENT_LENGTH);
    headers.remove(TRANSFER_ENCODING);
    headers.insert(DESTINATION, target);

    Ok(request)
}

/// Read every chunk of `body`.
///
/// The data stream is owned by this scope, so the underlying body is
/// released exactly once whether draining finishes or fails partway.
async fn drain(body: Body) -> UndeleteResult<Bytes> {
    let mut stream = body.into_data_stream();
    let mut buffer = BytesMut::new();

    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }

    Ok(buffer.freeze())
}
