pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

// Re-export key types for convenience

// Domain types - trash policy, value objects and errors
pub use domain::{
    ObjectPath, StorageError, TrashDestination, TrashPolicy, TrashPrefix, UndeleteError,
    ValidationError,
};

// Port types - interfaces for external systems
pub use ports::{ObjectBackend, ObjectInfo, ObjectLocation, StoredObject};

// Filter and backend adapters
pub use adapters::inbound::http::middleware::{
    CopyContext, CopyDisposition, CopyOutcome, TRASH_COPY_ERROR_PREFIX, UndeleteLayer,
    UndeleteMiddleware, handle_undelete_error,
};
pub use adapters::outbound::storage::InMemoryBackend;

// Application factory and configuration
pub use app::{AppError, UndeleteConfig, create_app, create_in_memory_app, filter_factory};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        InMemoryBackend, ObjectBackend, TrashPolicy, TrashPrefix, UndeleteConfig, UndeleteError,
        UndeleteLayer, create_app, create_in_memory_app, filter_factory,
    };
}
