use std::sync::Arc;

use blobdoc_store::{BlobStore, InMemoryBlobStore};
use tracing::{info, instrument};

use crate::config::StoreOptions;
use crate::container::Container;
use crate::error::DocResult;

/// Entry point to the document layer over one storage backend.
///
/// Cheap to clone; clones share the backend. Container-level administration
/// and cross-container transfers live here, per-container document
/// operations on the [`Container`] handles it hands out.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Arc<dyn BlobStore>,
    options: StoreOptions,
}

impl DocumentStore {
    /// Wrap a backend with default options.
    pub fn new(backend: Arc<dyn BlobStore>) -> Self {
        Self::with_options(backend, StoreOptions::default())
    }

    /// Wrap a backend with explicit options.
    pub fn with_options(backend: Arc<dyn BlobStore>, options: StoreOptions) -> Self {
        Self {
            backend,
            options: options.normalized(),
        }
    }

    /// A store over a fresh [`InMemoryBlobStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBlobStore::new()))
    }

    /// The underlying backend.
    pub fn backend(&self) -> &Arc<dyn BlobStore> {
        &self.backend
    }

    /// The active options.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// A document handle for one container. Does not touch storage.
    pub fn container(&self, name: impl Into<String>) -> Container {
        Container::new(Arc::clone(&self.backend), name.into(), self.options.clone())
    }

    /// Every container name, sorted.
    pub async fn list_containers(&self) -> DocResult<Vec<String>> {
        Ok(self.backend.list_containers().await?)
    }

    /// Create a container; fails with `AlreadyExists` if it is present.
    #[instrument(skip(self))]
    pub async fn create_container(&self, name: &str) -> DocResult<()> {
        self.backend.create_container(name).await?;
        info!("container created");
        Ok(())
    }

    /// Delete a container and all of its items. Returns `false` if it was
    /// already absent.
    #[instrument(skip(self))]
    pub async fn delete_container(&self, name: &str) -> DocResult<bool> {
        let deleted = self.backend.delete_container(name).await?;
        if deleted {
            info!("container deleted");
        }
        Ok(deleted)
    }

    /// Check whether a container exists.
    pub async fn container_exists(&self, name: &str) -> DocResult<bool> {
        Ok(self.backend.container_exists(name).await?)
    }

    /// Create a container unless present. Returns `true` if created.
    pub async fn ensure_container(&self, name: &str) -> DocResult<bool> {
        Ok(self.backend.create_container_if_absent(name).await?)
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
