//! Filesystem-backed blob store for local development and the CLI.
//!
//! [`LocalBlobStore`] maps each container to a directory under a root and
//! each item to a file inside it. Item names containing `/` become nested
//! directories; listing reports them with forward slashes again. Conditional
//! creates use `create_new(true)`, which maps to `O_CREAT | O_EXCL` on POSIX
//! systems.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

use crate::error::{StoreError, StoreResult};
use crate::names::{validate_container_name, validate_item_name};
use crate::traits::BlobStore;

/// A [`BlobStore`] backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        debug!(root = %root.display(), "LocalBlobStore opened");
        Ok(Self { root })
    }

    /// The root directory holding all containers.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory for `container`. Invalid names never reach the
    /// filesystem, so no container path can leave the root.
    fn container_path(&self, container: &str) -> StoreResult<PathBuf> {
        validate_container_name(container)?;
        Ok(self.root.join(container))
    }

    fn item_path(&self, container: &str, item: &str) -> StoreResult<PathBuf> {
        validate_item_name(item)?;
        let mut path = self.container_path(container)?;
        for segment in item.split('/') {
            path.push(segment);
        }
        Ok(path)
    }

    async fn require_container(&self, container: &str) -> StoreResult<PathBuf> {
        let path = self.container_path(container)?;
        if is_dir(&path).await? {
            Ok(path)
        } else {
            Err(StoreError::container_not_found(container))
        }
    }
}

async fn is_dir(path: &Path) -> StoreResult<bool> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn is_file(path: &Path) -> StoreResult<bool> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn create_parent(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    Ok(())
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    #[instrument(skip(self))]
    async fn list_containers(&self) -> StoreResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    #[instrument(skip(self))]
    async fn create_container(&self, container: &str) -> StoreResult<()> {
        match fs::create_dir(self.container_path(container)?).await {
            Ok(()) => {
                debug!("container created");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(StoreError::ContainerAlreadyExists {
                    container: container.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn delete_container(&self, container: &str) -> StoreResult<bool> {
        match fs::remove_dir_all(self.container_path(container)?).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn container_exists(&self, container: &str) -> StoreResult<bool> {
        match self.container_path(container) {
            Ok(path) => is_dir(&path).await,
            Err(_) => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn list_items(&self, container: &str) -> StoreResult<Vec<String>> {
        let base = self.require_container(container).await?;
        let mut results = Vec::new();
        list_recursive(&base, &base, &mut results).await?;
        results.sort();
        debug!(count = results.len(), "items listed");
        Ok(results)
    }

    async fn item_exists(&self, container: &str, item: &str) -> StoreResult<bool> {
        match self.item_path(container, item) {
            Ok(path) => is_file(&path).await,
            Err(_) => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn get_item(&self, container: &str, item: &str) -> StoreResult<Bytes> {
        self.require_container(container).await?;
        let path = self.item_path(container, item)?;
        match fs::read(&path).await {
            Ok(data) => {
                debug!(size = data.len(), "item read");
                Ok(Bytes::from(data))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StoreError::item_not_found(container, item))
            }
            // A directory is an item-name prefix, not an item.
            Err(_) if is_dir(&path).await? => Err(StoreError::item_not_found(container, item)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn put_item(
        &self,
        container: &str,
        item: &str,
        data: Bytes,
        overwrite: bool,
    ) -> StoreResult<()> {
        let path = self.item_path(container, item)?;
        self.require_container(container).await?;
        create_parent(&path).await?;

        if overwrite {
            fs::write(&path, &data).await?;
        } else {
            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    return Err(StoreError::ItemAlreadyExists {
                        container: container.to_string(),
                        item: item.to_string(),
                    });
                }
                Err(e) => return Err(e.into()),
            };
            file.write_all(&data).await?;
            file.flush().await?;
        }
        debug!(overwrite, "item written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_item_if_exists(&self, container: &str, item: &str) -> StoreResult<bool> {
        let Ok(path) = self.item_path(container, item) else {
            return Ok(false);
        };
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(_) if is_dir(&path).await? => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn copy_item(
        &self,
        from_container: &str,
        from_item: &str,
        to_container: &str,
        to_item: &str,
    ) -> StoreResult<()> {
        let source = self.item_path(from_container, from_item)?;
        let dest = self.item_path(to_container, to_item)?;
        self.require_container(from_container).await?;
        self.require_container(to_container).await?;

        if !is_file(&source).await? {
            return Err(StoreError::item_not_found(from_container, from_item));
        }
        create_parent(&dest).await?;
        let copied = fs::copy(&source, &dest).await?;
        debug!(bytes = copied, "item copied");
        Ok(())
    }
}

/// Recursively list all files under `dir`, producing names relative to `base`.
async fn list_recursive(base: &Path, dir: &Path, results: &mut Vec<String>) -> StoreResult<()> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_dir() {
            Box::pin(list_recursive(base, &path, results)).await?;
        } else {
            let relative = path
                .strip_prefix(base)
                .map_err(|e| StoreError::Internal(format!("path prefix strip failed: {e}")))?;
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            results.push(name);
        }
    }

    Ok(())
}
