//! In-memory blob store for tests and embedding.
//!
//! [`InMemoryBlobStore`] keeps every container in a `BTreeMap` behind a
//! `RwLock`. It implements the full [`BlobStore`] trait, including atomic
//! conditional creates, and loses all data when dropped.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::names::{validate_container_name, validate_item_name};
use crate::traits::BlobStore;

type Containers = BTreeMap<String, BTreeMap<String, Bytes>>;

/// An in-memory implementation of [`BlobStore`].
pub struct InMemoryBlobStore {
    containers: RwLock<Containers>,
}

impl InMemoryBlobStore {
    /// Create a new store with no containers.
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(BTreeMap::new()),
        }
    }

    /// Total number of items across all containers.
    pub fn item_count(&self) -> usize {
        self.read_lock()
            .map(|map| map.values().map(BTreeMap::len).sum())
            .unwrap_or(0)
    }

    fn read_lock(&self) -> StoreResult<RwLockReadGuard<'_, Containers>> {
        self.containers
            .read()
            .map_err(|e| StoreError::Internal(format!("lock poisoned: {e}")))
    }

    fn write_lock(&self) -> StoreResult<RwLockWriteGuard<'_, Containers>> {
        self.containers
            .write()
            .map_err(|e| StoreError::Internal(format!("lock poisoned: {e}")))
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn list_containers(&self) -> StoreResult<Vec<String>> {
        Ok(self.read_lock()?.keys().cloned().collect())
    }

    async fn create_container(&self, container: &str) -> StoreResult<()> {
        validate_container_name(container)?;
        let mut map = self.write_lock()?;
        if map.contains_key(container) {
            return Err(StoreError::ContainerAlreadyExists {
                container: container.to_string(),
            });
        }
        map.insert(container.to_string(), BTreeMap::new());
        debug!(container, "container created");
        Ok(())
    }

    async fn delete_container(&self, container: &str) -> StoreResult<bool> {
        Ok(self.write_lock()?.remove(container).is_some())
    }

    async fn container_exists(&self, container: &str) -> StoreResult<bool> {
        Ok(self.read_lock()?.contains_key(container))
    }

    async fn list_items(&self, container: &str) -> StoreResult<Vec<String>> {
        let map = self.read_lock()?;
        let items = map
            .get(container)
            .ok_or_else(|| StoreError::container_not_found(container))?;
        Ok(items.keys().cloned().collect())
    }

    async fn item_exists(&self, container: &str, item: &str) -> StoreResult<bool> {
        let map = self.read_lock()?;
        Ok(map
            .get(container)
            .is_some_and(|items| items.contains_key(item)))
    }

    async fn get_item(&self, container: &str, item: &str) -> StoreResult<Bytes> {
        let map = self.read_lock()?;
        let items = map
            .get(container)
            .ok_or_else(|| StoreError::container_not_found(container))?;
        items
            .get(item)
            .cloned()
            .ok_or_else(|| StoreError::item_not_found(container, item))
    }

    async fn put_item(
        &self,
        container: &str,
        item: &str,
        data: Bytes,
        overwrite: bool,
    ) -> StoreResult<()> {
        validate_item_name(item)?;
        let mut map = self.write_lock()?;
        let items = map
            .get_mut(container)
            .ok_or_else(|| StoreError::container_not_found(container))?;
        if !overwrite && items.contains_key(item) {
            return Err(StoreError::ItemAlreadyExists {
                container: container.to_string(),
                item: item.to_string(),
            });
        }
        debug!(container, item, size = data.len(), "item written");
        items.insert(item.to_string(), data);
        Ok(())
    }

    async fn delete_item_if_exists(&self, container: &str, item: &str) -> StoreResult<bool> {
        let mut map = self.write_lock()?;
        Ok(map
            .get_mut(container)
            .is_some_and(|items| items.remove(item).is_some()))
    }

    async fn copy_item(
        &self,
        from_container: &str,
        from_item: &str,
        to_container: &str,
        to_item: &str,
    ) -> StoreResult<()> {
        validate_item_name(to_item)?;
        let mut map = self.write_lock()?;
        let data = map
            .get(from_container)
            .ok_or_else(|| StoreError::container_not_found(from_container))?
            .get(from_item)
            .cloned()
            .ok_or_else(|| StoreError::item_not_found(from_container, from_item))?;
        map.get_mut(to_container)
            .ok_or_else(|| StoreError::container_not_found(to_container))?
            .insert(to_item.to_string(), data);
        debug!(from_container, from_item, to_container, to_item, "item copied");
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBlobStore")
            .field("item_count", &self.item_count())
            .finish()
    }
}
