use axum::{
    body::Body,
    http::{Method, Request, Response, StatusCode},
    response::IntoResponse,
};
use bytes::BytesMut;
use futures::future::BoxFuture;
use http::{
    HeaderValue,
    header::{CONTENT_LENGTH, TRANSFER_ENCODING},
};
use std::{
    sync::Arc,
    task::{Context, Poll},
};
use tower::{BoxError, Layer, Service};
use tracing::{debug, error, info, warn};

use super::copy::{CopyContext, CopyOutcome};
use crate::domain::{errors::UndeleteError, models::TrashPolicy, value_objects::ObjectPath};

/// Body prefix of the response returned when the trash copy fails
pub const TRASH_COPY_ERROR_PREFIX: &str = "Error copying object to trash:\n";

/// What to do with a DELETE once its trash copy has completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyDisposition {
    /// Copy succeeded; let the delete through
    Forward,
    /// Trash container is missing and would have to be created first
    MissingContainer,
    /// Copy failed; refuse the delete and report the copy failure
    Fail,
}

impl CopyDisposition {
    pub fn classify(status: StatusCode) -> Self {
        if status.is_success() {
            CopyDisposition::Forward
        } else if status == StatusCode::NOT_FOUND {
            CopyDisposition::MissingContainer
        } else {
            CopyDisposition::Fail
        }
    }
}

/// The Tower layer that saves a trash copy of every deleted object
#[derive(Debug, Clone)]
pub struct UndeleteLayer {
    policy: Arc<TrashPolicy>,
}

impl UndeleteLayer {
    pub fn new(policy: TrashPolicy) -> Self {
        UndeleteLayer {
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &TrashPolicy {
        &self.policy
    }
}

impl<S> Layer<S> for UndeleteLayer {
    type Service = UndeleteMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        UndeleteMiddleware {
            inner,
            policy: self.policy.clone(),
        }
    }
}

/// Middleware that copies objects into their trash container before
/// letting a DELETE reach the backend.
///
/// Errors are boxed. A missing trash container surfaces as
/// [`UndeleteError::ContainerCreationNotImplemented`] rather than as a
/// response, so it can be told apart from failures of the inner service.
#[derive(Debug, Clone)]
pub struct UndeleteMiddleware<S> {
    inner: S,
    policy: Arc<TrashPolicy>,
}

impl<S> Service<Request<Body>> for UndeleteMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Send + Clone + 'static,
    S::Future: Send + 'static,
    S::Error: Into<BoxError>,
{
    type Response = Response<Body>;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        // Keep the service that was driven to readiness and leave a fresh clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        if req.method() != Method::DELETE {
            return forward(&mut inner, req);
        }

        let Some(path) = ObjectPath::parse(req.uri().path()) else {
            debug!(path = %req.uri().path(), "Not a decodable object DELETE, passing through");
            return forward(&mut inner, req);
        };

        if !self.policy.should_trash(&path.container) {
            debug!(
                container = %path.container,
                object = %path.object,
                "Deleting from a trash container, no copy saved"
            );
            return forward(&mut inner, req);
        }

        Box::pin(trash_then_delete(inner, self.policy.clone(), path, req))
    }
}

fn forward<S>(
    inner: &mut S,
    req: Request<Body>,
) -> BoxFuture<'static, Result<Response<Body>, BoxError>>
where
    S: Service<Request<Body>, Response = Response<Body>>,
    S::Future: Send + 'static,
    S::Error: Into<BoxError>,
{
    let future = inner.call(req);
    Box::pin(async move { future.await.map_err(Into::<BoxError>::into) })
}

/// Copy the object to its trash container, then decide the DELETE's fate
async fn trash_then_delete<S>(
    mut inner: S,
    policy: Arc<TrashPolicy>,
    path: ObjectPath,
    req: Request<Body>,
) -> Result<Response<Body>, BoxError>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone,
    S::Error: Into<BoxError>,
{
    let destination = policy.trash_destination(&path.container, &path.object);
    let (parts, body) = req.into_parts();

    let outcome = CopyContext::new(inner.clone())
        .copy(&parts, &destination)
        .await?;

    match CopyDisposition::classify(outcome.status) {
        CopyDisposition::Forward => {
            info!(
                container = %path.container,
                object = %path.object,
                trash_container = %destination.container,
                status = outcome.status.as_u16(),
                "Saved trash copy, forwarding DELETE"
            );
            let req = Request::from_parts(parts, body);
            inner.call(req).await.map_err(Into::into)
        }
        CopyDisposition::MissingContainer => {
            error!(
                container = %path.container,
                object = %path.object,
                trash_container = %destination.container,
                "Trash container does not exist and cannot be created automatically"
            );
            Err(UndeleteError::ContainerCreationNotImplemented {
                container: destination.container,
            }
            .into())
        }
        CopyDisposition::Fail => {
            warn!(
                container = %path.container,
                object = %path.object,
                trash_container = %destination.container,
                status = outcome.status.as_u16(),
                "Trash copy failed, refusing DELETE"
            );
            Ok(copy_failure_response(outcome))
        }
    }
}

/// Response for a refused DELETE: the copy's status and headers, with the
/// copy's body behind [`TRASH_COPY_ERROR_PREFIX`]
fn copy_failure_response(outcome: CopyOutcome) -> Response<Body> {
    let mut body = BytesMut::from(TRASH_COPY_ERROR_PREFIX.as_bytes());
    body.extend_from_slice(&outcome.body);
    let body = body.freeze();

    let mut response = Response::new(Body::empty());
    *response.status_mut() = outcome.status;
    *response.headers_mut() = outcome.headers;

    let headers = response.headers_mut();
    headers.remove(TRANSFER_ENCODING);
    headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));

    *response.body_mut() = Body::from(body);
    response
}

/// Turns a boxed filter error into a response at the edge of the server
pub async fn handle_undelete_error(err: BoxError) -> Response<Body> {
    match err.downcast_ref::<UndeleteError>() {
        Some(e) if e.is_not_implemented() => {
            error!(error = %e, "Undelete capability missing");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Some(e) => {
            error!(error = %e, "Undelete filter failed");
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
        None => {
            error!(error = %err, "Unhandled backend error");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
