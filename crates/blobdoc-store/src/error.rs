/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The named container does not exist.
    #[error("container not found: {container}")]
    ContainerNotFound { container: String },

    /// A container with this name already exists.
    #[error("container already exists: {container}")]
    ContainerAlreadyExists { container: String },

    /// The named item does not exist in the container.
    #[error("item not found: {container}/{item}")]
    ItemNotFound { container: String, item: String },

    /// A conditional create found the item name already taken.
    #[error("item already exists: {container}/{item}")]
    ItemAlreadyExists { container: String, item: String },

    /// A container or item name violates the naming rules.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend failure that fits no other variant.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Returns `true` for the container- and item-level not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::ContainerNotFound { .. } | StoreError::ItemNotFound { .. }
        )
    }

    pub(crate) fn item_not_found(container: &str, item: &str) -> Self {
        StoreError::ItemNotFound {
            container: container.to_string(),
            item: item.to_string(),
        }
    }

    pub(crate) fn container_not_found(container: &str) -> Self {
        StoreError::ContainerNotFound {
            container: container.to_string(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
