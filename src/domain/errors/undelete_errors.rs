use tower::BoxError;

/// Errors raised while moving an object to trash ahead of its deletion.
///
/// `ContainerCreationNotImplemented` is the one variant that represents a
/// missing capability rather than a failed request; callers holding a
/// [`BoxError`] can recover it with `downcast_ref::<UndeleteError>()`.
#[derive(Debug, thiserror::Error)]
pub enum UndeleteError {
    #[error("Trash container creation is not implemented (container: {container})")]
    ContainerCreationNotImplemented { container: String },

    #[error("Invalid trash destination: {destination}")]
    InvalidDestination { destination: String },

    #[error("Copy sub-request failed: {0}")]
    Dispatch(BoxError),

    #[error("Failed to drain copy response body: {0}")]
    DrainBody(#[from] axum::Error),

    #[error("Failed to build copy sub-request: {0}")]
    Request(#[from] http::Error),
}

impl UndeleteError {
    /// True when the error marks a capability gap rather than a request failure
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, UndeleteError::ContainerCreationNotImplemented { .. })
    }
}

/// Result type for undelete operations
pub type UndeleteResult<T> = Result<T, UndeleteError>;
