use blobdoc_store::StoreError;
use thiserror::Error;

/// Errors produced by document store operations.
#[derive(Debug, Error)]
pub enum DocError {
    /// The item (or its container) is absent where it is required to exist.
    #[error("not found: {}", location(.container, .item))]
    NotFound { container: String, item: String },

    /// A conditional create found the name already taken.
    #[error("already exists: {}", location(.container, .item))]
    AlreadyExists { container: String, item: String },

    /// The payload is not valid JSON or does not match the target type.
    #[error("cannot decode {item}: {reason}")]
    Decode { item: String, reason: String },

    /// A document's identity field holds something other than a string.
    #[error("unsupported identifier type: Id field holds {found}, expected a string or UUID")]
    UnsupportedIdentifierType { found: &'static str },

    /// The copy step of a move or rename committed but the delete step
    /// failed; the item now exists under both names.
    #[error(
        "transfer of {from_container}/{from_item} to {to_container}/{to_item} \
         copied but did not remove the source: {reason}"
    )]
    TransferPartialFailure {
        from_container: String,
        from_item: String,
        to_container: String,
        to_item: String,
        reason: String,
    },

    /// The caller passed an empty identifier, empty payload, or similar.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other failure from the storage backend.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl DocError {
    pub(crate) fn decode(item: &str, reason: impl ToString) -> Self {
        DocError::Decode {
            item: item.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn not_found(container: &str, item: &str) -> Self {
        DocError::NotFound {
            container: container.to_string(),
            item: item.to_string(),
        }
    }

    /// Returns `true` if this is a [`DocError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocError::NotFound { .. })
    }
}

impl From<StoreError> for DocError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ItemNotFound { container, item } => DocError::NotFound { container, item },
            StoreError::ContainerNotFound { container } => DocError::NotFound {
                container,
                item: String::new(),
            },
            StoreError::ItemAlreadyExists { container, item } => {
                DocError::AlreadyExists { container, item }
            }
            StoreError::ContainerAlreadyExists { container } => DocError::AlreadyExists {
                container,
                item: String::new(),
            },
            StoreError::InvalidName { name, reason } => {
                DocError::InvalidArgument(format!("invalid name {name:?}: {reason}"))
            }
            other => DocError::Store(other),
        }
    }
}

/// `container/item`, or just `container` for container-level errors.
fn location(container: &str, item: &str) -> String {
    if item.is_empty() {
        container.to_string()
    } else {
        format!("{container}/{item}")
    }
}

/// Result alias for document store operations.
pub type DocResult<T> = Result<T, DocError>;
