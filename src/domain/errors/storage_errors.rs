/// Errors that can occur during backend storage operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Container not found: {account}/{container}")]
    ContainerNotFound { account: String, container: String },

    #[error("Object not found: {path}")]
    ObjectNotFound { path: String },

    #[error("Destination header must be of the form <container-name>/<object-name>: {destination}")]
    InvalidDestination { destination: String },

    #[error("Storage backend error: {message}")]
    Backend { message: String },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
