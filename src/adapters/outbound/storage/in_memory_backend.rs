use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{
    ObjectStore,
    memory::InMemory,
    path::{Path as StorePath, PathPart},
};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::errors::{StorageError, StorageResult},
    ports::storage::{ObjectBackend, ObjectInfo, ObjectLocation, StoredObject},
};

/// In-memory implementation of ObjectBackend for testing and development.
///
/// Object data lives in an `object_store` [`InMemory`] store under
/// `<account>/<container>/<object>`, each name stored as a single encoded
/// [`PathPart`] so `/` inside a container or object name never adds a level
/// and `dir`, `dir/` and `/dir` stay distinct. Containers are tracked
/// separately so a write into a container that was never created fails the
/// way a real cluster does.
#[derive(Clone)]
pub struct InMemoryBackend {
    store: Arc<InMemory>,
    containers: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            containers: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    fn container_key(account: &str, container: &str) -> String {
        Self::container_path(account, container).to_string()
    }

    fn container_path(account: &str, container: &str) -> StorePath {
        StorePath::from_iter([PathPart::from(account), PathPart::from(container)])
    }

    fn make_path(location: &ObjectLocation) -> StorePath {
        Self::container_path(&location.account, &location.container)
            .child(PathPart::from(location.object.as_str()))
    }

    /// Object name of a stored path, reversing the part encoding
    fn object_name(part: &PathPart<'_>) -> String {
        urlencoding::decode(part.as_ref())
            .map(|name| name.into_owned())
            .unwrap_or_else(|_| part.as_ref().to_string())
    }

    async fn ensure_container(&self, account: &str, container: &str) -> StorageResult<()> {
        if self.container_exists(account, container).await? {
            Ok(())
        } else {
            Err(StorageError::ContainerNotFound {
                account: account.to_string(),
                container: container.to_string(),
            })
        }
    }

    fn object_info(name: String, data: &Bytes, meta: &object_store::ObjectMeta) -> ObjectInfo {
        ObjectInfo {
            name,
            bytes: meta.size as u64,
            hash: format!("{:x}", md5::compute(data)),
            last_modified: meta.last_modified,
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectBackend for InMemoryBackend {
    async fn create_container(&self, account: &str, container: &str) -> StorageResult<bool> {
        let mut containers = self.containers.write().await;
        Ok(containers.insert(Self::container_key(account, container)))
    }

    async fn container_exists(&self, account: &str, container: &str) -> StorageResult<bool> {
        let containers = self.containers.read().await;
        Ok(containers.contains(&Self::container_key(account, container)))
    }

    async fn list_container(
        &self,
        account: &str,
        container: &str,
    ) -> StorageResult<Vec<ObjectInfo>> {
        self.ensure_container(account, container).await?;

        let prefix = Self::container_path(account, container);
        let metas: Vec<_> = self.store.list(Some(&prefix)).try_collect().await?;

        let mut objects = Vec::with_capacity(metas.len());
        for meta in metas {
            let Some(name) = meta
                .location
                .prefix_match(&prefix)
                .and_then(|mut parts| parts.next())
                .map(|part| Self::object_name(&part))
            else {
                continue;
            };
            let data = self.store.get(&meta.location).await?.bytes().await?;
            objects.push(Self::object_info(name, &data, &meta));
        }

        objects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(objects)
    }

    async fn put_object(&self, location: &ObjectLocation, data: Bytes) -> StorageResult<ObjectInfo> {
        self.ensure_container(&location.account, &location.container)
            .await?;

        let path = Self::make_path(location);
        self.store.put(&path, data.clone().into()).await?;
        let meta = self.store.head(&path).await?;

        Ok(Self::object_info(location.object.clone(), &data, &meta))
    }

    async fn get_object(&self, location: &ObjectLocation) -> StorageResult<StoredObject> {
        self.ensure_container(&location.account, &location.container)
            .await?;

        let result = self.store.get(&Self::make_path(location)).await?;
        let meta = result.meta.clone();
        let data = result.bytes().await?;

        Ok(StoredObject {
            info: Self::object_info(location.object.clone(), &data, &meta),
            data,
        })
    }

    async fn delete_object(&self, location: &ObjectLocation) -> StorageResult<()> {
        self.ensure_container(&location.account, &location.container)
            .await?;

        // InMemory deletes are idempotent; a missing object must still 404
        let path = Self::make_path(location);
        self.store.head(&path).await?;
        self.store.delete(&path).await?;
        Ok(())
    }

    async fn copy_object(
        &self,
        source: &ObjectLocation,
        destination: &ObjectLocation,
    ) -> StorageResult<ObjectInfo> {
        self.ensure_container(&source.account, &source.container)
            .await?;
        self.ensure_container(&destination.account, &destination.container)
            .await?;

        self.store
            .copy(&Self::make_path(source), &Self::make_path(destination))
            .await?;

        let copied = self.get_object(destination).await?;
        Ok(copied.info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn backend_with(containers: &[&str]) -> InMemoryBackend {
        let backend = InMemoryBackend::new();
        for container in containers {
            backend.create_container("acct", container).await.unwrap();
        }
        backend
    }

    #[tokio::test]
    async fn test_create_container_reports_existing() {
        let backend = InMemoryBackend::new();
        assert!(backend.create_container("acct", "pics").await.unwrap());
        assert!(!backend.create_container("acct", "pics").await.unwrap());
        assert!(backend.container_exists("acct", "pics").await.unwrap());
        assert!(!backend.container_exists("other", "pics").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let backend = backend_with(&["pics"]).await;
        let location = ObjectLocation::new("acct", "pics", "cat.jpg");

        let info = backend
            .put_object(&location, Bytes::from("meow"))
            .await
            .unwrap();
        assert_eq!(info.name, "cat.jpg");
        assert_eq!(info.bytes, 4);
        assert_eq!(info.hash, format!("{:x}", md5::compute(b"meow")));

        let stored = backend.get_object(&location).await.unwrap();
        assert_eq!(stored.data, Bytes::from("meow"));

        backend.delete_object(&location).await.unwrap();
        assert!(matches!(
            backend.get_object(&location).await,
            Err(StorageError::ObjectNotFound { .. })
        ));
        assert!(matches!(
            backend.delete_object(&location).await,
            Err(StorageError::ObjectNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_put_into_missing_container() {
        let backend = InMemoryBackend::new();
        let location = ObjectLocation::new("acct", "pics", "cat.jpg");

        let result = backend.put_object(&location, Bytes::from("meow")).await;
        assert_eq!(
            result.unwrap_err(),
            StorageError::ContainerNotFound {
                account: "acct".to_string(),
                container: "pics".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_copy_object() {
        let backend = backend_with(&["pics", ".trash-pics"]).await;
        let source = ObjectLocation::new("acct", "pics", "cat.jpg");
        backend
            .put_object(&source, Bytes::from("meow"))
            .await
            .unwrap();

        let destination = source.in_container(".trash-pics", "cat.jpg");
        let info = backend.copy_object(&source, &destination).await.unwrap();
        assert_eq!(info.name, "cat.jpg");

        let copied = backend.get_object(&destination).await.unwrap();
        assert_eq!(copied.data, Bytes::from("meow"));
        // Source is untouched
        assert!(backend.get_object(&source).await.is_ok());
    }

    #[tokio::test]
    async fn test_copy_into_missing_container() {
        let backend = backend_with(&["pics"]).await;
        let source = ObjectLocation::new("acct", "pics", "cat.jpg");
        backend
            .put_object(&source, Bytes::from("meow"))
            .await
            .unwrap();

        let destination = source.in_container(".trash-pics", "cat.jpg");
        assert!(matches!(
            backend.copy_object(&source, &destination).await,
            Err(StorageError::ContainerNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_copy_missing_source() {
        let backend = backend_with(&["pics", ".trash-pics"]).await;
        let source = ObjectLocation::new("acct", "pics", "ghost.jpg");
        let destination = source.in_container(".trash-pics", "ghost.jpg");

        assert!(matches!(
            backend.copy_object(&source, &destination).await,
            Err(StorageError::ObjectNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_container() {
        let backend = backend_with(&["docs", "docs2"]).await;
        for name in ["b.txt", "a.txt", "2024/q1/report.pdf"] {
            backend
                .put_object(&ObjectLocation::new("acct", "docs", name), Bytes::from(name))
                .await
                .unwrap();
        }
        backend
            .put_object(&ObjectLocation::new("acct", "docs2", "c.txt"), Bytes::from("c"))
            .await
            .unwrap();

        let names: Vec<_> = backend
            .list_container("acct", "docs")
            .await
            .unwrap()
            .into_iter()
            .map(|info| info.name)
            .collect();
        assert_eq!(names, vec!["2024/q1/report.pdf", "a.txt", "b.txt"]);

        assert!(matches!(
            backend.list_container("acct", "missing").await,
            Err(StorageError::ContainerNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_similar_object_names_do_not_collide() {
        let backend = backend_with(&["pics"]).await;
        for name in ["dir", "dir/", "/dir", "100%25", "100%"] {
            backend
                .put_object(&ObjectLocation::new("acct", "pics", name), Bytes::from(name))
                .await
                .unwrap();
        }

        for name in ["dir", "dir/", "/dir", "100%25", "100%"] {
            let stored = backend
                .get_object(&ObjectLocation::new("acct", "pics", name))
                .await
                .unwrap();
            assert_eq!(stored.data, Bytes::from(name));
        }

        let names: Vec<_> = backend
            .list_container("acct", "pics")
            .await
            .unwrap()
            .into_iter()
            .map(|info| info.name)
            .collect();
        assert_eq!(names, vec!["/dir", "100%", "100%25", "dir", "dir/"]);
    }

    #[tokio::test]
    async fn test_container_with_slash_is_its_own_container() {
        let backend = backend_with(&["a/b", "a"]).await;
        backend
            .put_object(&ObjectLocation::new("acct", "a/b", "cat.jpg"), Bytes::from("meow"))
            .await
            .unwrap();

        assert!(matches!(
            backend
                .get_object(&ObjectLocation::new("acct", "a", "b/cat.jpg"))
                .await,
            Err(StorageError::ObjectNotFound { .. })
        ));
        assert!(backend.list_container("acct", "a").await.unwrap().is_empty());
        assert_eq!(backend.list_container("acct", "a/b").await.unwrap().len(), 1);
    }
}
