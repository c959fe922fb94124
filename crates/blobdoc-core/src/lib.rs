//! JSON document store semantics over blob containers.
//!
//! `blobdoc-core` turns any [`blobdoc_store::BlobStore`] into a simple
//! document database: each container is a collection, each item a JSON
//! document named `<id>.json`.
//!
//! # Core Concepts
//!
//! - **[`Document`]**: a serde type with an identity field whose value always
//!   equals the stem of the item it is stored under.
//! - **[`DocumentStore`]**: the entry point. Administers containers and moves
//!   or renames items between them.
//! - **[`Container`]**: per-container create, read, update, delete, merge,
//!   search, sequential posting, and raw uploads.
//! - **Codec**: decodes field names case-insensitively and pins identity to
//!   the item name on every read.
//!
//! # Identity
//!
//! New documents get a random v4 UUID. Sequentially posted payloads get one
//! past the largest numeric item stem, guarded by a conditional create so
//! concurrent posters never overwrite each other.
//!
//! # Example
//!
//! ```
//! use blobdoc_core::{Document, DocumentStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Note {
//!     #[serde(default)]
//!     id: String,
//!     text: String,
//! }
//!
//! impl Document for Note {
//!     type Id = String;
//!     fn id(&self) -> Option<&String> { Some(&self.id) }
//!     fn set_id(&mut self, id: String) { self.id = id; }
//! }
//!
//! # block_on(async {
//! let store = DocumentStore::in_memory();
//! store.create_container("notes").await?;
//! let notes = store.container("notes");
//! let note = notes.create(Note { id: String::new(), text: "hello".into() }).await?;
//! let again: Note = notes.get(&format!("{}.json", note.id)).await?;
//! assert_eq!(again.text, "hello");
//! # Ok::<(), blobdoc_core::DocError>(())
//! # });
//! # fn block_on<F>(f: F)
//! # where
//! #     F: std::future::Future<Output = Result<(), blobdoc_core::DocError>>,
//! # {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f).unwrap();
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod container;
pub mod document;
pub mod error;
pub mod ident;
pub mod outcome;
pub mod scan;
pub mod store;
pub mod transfer;

#[cfg(test)]
mod testing;

// Re-export primary types at crate root for ergonomic imports.
pub use config::StoreOptions;
pub use container::Container;
pub use document::{Document, Identifier};
pub use error::{DocError, DocResult};
pub use outcome::{DeleteOutcome, Lookup, PostReceipt, TransferReceipt};
pub use scan::DocumentStream;
pub use store::DocumentStore;
