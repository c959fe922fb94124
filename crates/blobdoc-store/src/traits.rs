//! The [`BlobStore`] trait: the capability set every storage backend offers.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{StoreError, StoreResult};

/// Container-oriented blob storage.
///
/// A backend holds named containers, each mapping item names to opaque byte
/// payloads. The document layer never touches a backend except through this
/// trait.
///
/// All implementations must satisfy these invariants:
/// - `put_item` with `overwrite == false` is a conditional create: it either
///   writes a new item or fails with [`StoreError::ItemAlreadyExists`],
///   atomically with respect to other writers.
/// - `copy_item` copies inside the backend; payload bytes never pass through
///   the caller.
/// - Missing containers and items are reported through the typed not-found
///   variants, never through sentinel values.
/// - All I/O errors are propagated, never silently ignored.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// List every container name, sorted.
    async fn list_containers(&self) -> StoreResult<Vec<String>>;

    /// Create a container. Fails if it already exists.
    async fn create_container(&self, container: &str) -> StoreResult<()>;

    /// Delete a container and everything in it.
    ///
    /// Returns `Ok(false)` if the container did not exist.
    async fn delete_container(&self, container: &str) -> StoreResult<bool>;

    /// Check whether a container exists.
    async fn container_exists(&self, container: &str) -> StoreResult<bool>;

    /// List every item name in a container.
    ///
    /// Order is backend-defined. Fails with
    /// [`StoreError::ContainerNotFound`] if the container is absent.
    async fn list_items(&self, container: &str) -> StoreResult<Vec<String>>;

    /// Check whether an item exists. An absent container yields `Ok(false)`.
    async fn item_exists(&self, container: &str, item: &str) -> StoreResult<bool>;

    /// Read an item's full payload.
    async fn get_item(&self, container: &str, item: &str) -> StoreResult<Bytes>;

    /// Write an item's payload.
    ///
    /// With `overwrite == false` the write only succeeds if the name is free.
    async fn put_item(
        &self,
        container: &str,
        item: &str,
        data: Bytes,
        overwrite: bool,
    ) -> StoreResult<()>;

    /// Delete an item. Returns `true` if the item existed.
    async fn delete_item_if_exists(&self, container: &str, item: &str) -> StoreResult<bool>;

    /// Copy an item to a (possibly different) container and name,
    /// overwriting any existing destination item.
    async fn copy_item(
        &self,
        from_container: &str,
        from_item: &str,
        to_container: &str,
        to_item: &str,
    ) -> StoreResult<()>;

    /// Create a container unless it already exists.
    ///
    /// Returns `true` if this call created it. A concurrent creator winning
    /// the race is not an error.
    async fn create_container_if_absent(&self, container: &str) -> StoreResult<bool> {
        if self.container_exists(container).await? {
            return Ok(false);
        }
        match self.create_container(container).await {
            Ok(()) => Ok(true),
            Err(StoreError::ContainerAlreadyExists { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
