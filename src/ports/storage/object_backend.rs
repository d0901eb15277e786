use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::errors::StorageResult;

/// Fully qualified name of an object in the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub account: String,
    pub container: String,
    pub object: String,
}

impl ObjectLocation {
    pub fn new(
        account: impl Into<String>,
        container: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            container: container.into(),
            object: object.into(),
        }
    }

    /// Same account and object name, different container
    pub fn in_container(&self, container: impl Into<String>, object: impl Into<String>) -> Self {
        Self::new(self.account.clone(), container, object)
    }
}

impl std::fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.account, self.container, self.object)
    }
}

/// Listing entry and metadata for a stored object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectInfo {
    pub name: String,
    pub bytes: u64,
    /// Hex MD5 of the content, served as the ETag
    pub hash: String,
    pub last_modified: DateTime<Utc>,
}

/// An object together with its content
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub info: ObjectInfo,
    pub data: Bytes,
}

/// Port for the account/container/object backend that sits behind the
/// undelete filter
#[async_trait]
pub trait ObjectBackend: Send + Sync + 'static {
    /// Create a container. Returns `false` when it already existed.
    async fn create_container(&self, account: &str, container: &str) -> StorageResult<bool>;

    async fn container_exists(&self, account: &str, container: &str) -> StorageResult<bool>;

    /// List the objects of a container, sorted by name
    async fn list_container(&self, account: &str, container: &str)
    -> StorageResult<Vec<ObjectInfo>>;

    /// Store an object; its container must exist
    async fn put_object(&self, location: &ObjectLocation, data: Bytes) -> StorageResult<ObjectInfo>;

    async fn get_object(&self, location: &ObjectLocation) -> StorageResult<StoredObject>;

    async fn delete_object(&self, location: &ObjectLocation) -> StorageResult<()>;

    /// Server-side copy. Fails with a not-found error when either the source
    /// object or the destination container is missing.
    async fn copy_object(
        &self,
        source: &ObjectLocation,
        destination: &ObjectLocation,
    ) -> StorageResult<ObjectInfo>;
}
