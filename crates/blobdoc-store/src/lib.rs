//! Blob container storage for blobdoc.
//!
//! This crate defines the storage capability set the document layer is built
//! on: named containers holding named byte payloads, with list, read, write,
//! delete, and server-side copy. It knows nothing about JSON or documents.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`InMemoryBlobStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`LocalBlobStore`] -- one directory per container on the local filesystem
//!
//! # Design Rules
//!
//! 1. Conditional create (`put_item` with `overwrite == false`) is atomic.
//! 2. Copies happen inside the backend; the caller never streams the bytes.
//! 3. Absence is a typed error or a `bool`, never an in-band value.
//! 4. Names are validated by the backend before anything touches storage.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod local;
pub mod memory;
pub mod names;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use local::LocalBlobStore;
pub use memory::InMemoryBlobStore;
pub use names::{validate_container_name, validate_item_name};
pub use traits::BlobStore;
