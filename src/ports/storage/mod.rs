mod object_backend;

pub use object_backend::{ObjectBackend, ObjectInfo, ObjectLocation, StoredObject};
