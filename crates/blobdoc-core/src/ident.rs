//! Identifier allocation.
//!
//! Two strategies:
//! - **Random**: a fresh v4 UUID per document. Collisions are not checked
//!   against existing names beyond the conditional create the store issues.
//! - **Sequential**: one past the largest purely numeric item stem in a
//!   container, or `0` when none exist. Recomputed from a full listing on
//!   every call, so two concurrent callers can compute the same value; the
//!   posting path relies on conditional create to detect that.

use blobdoc_store::BlobStore;
use tracing::debug;
use uuid::Uuid;

use crate::document::item_stem;
use crate::error::{DocError, DocResult};

/// Allocate a random identifier.
pub fn random_id() -> Uuid {
    Uuid::new_v4()
}

/// The next free sequence number given a container's item names.
///
/// Names whose stem does not parse as a non-negative integer are ignored.
/// Returns `None` once `u64::MAX` is taken.
///
/// ```
/// use blobdoc_core::ident::next_sequence;
///
/// assert_eq!(next_sequence(["0.json", "1.json", "2.json"]), Some(3));
/// assert_eq!(next_sequence(["notes.json", "a1.json"]), Some(0));
/// assert_eq!(next_sequence(Vec::<&str>::new()), Some(0));
/// ```
pub fn next_sequence<'a, I>(names: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter_map(|name| item_stem(name).parse::<u64>().ok())
        .max()
        .map_or(Some(0), |max| max.checked_add(1))
}

/// Scan `container` and return its next free sequence number.
pub async fn allocate_sequence(backend: &dyn BlobStore, container: &str) -> DocResult<u64> {
    let names = backend.list_items(container).await?;
    let next = next_sequence(names.iter().map(String::as_str)).ok_or_else(|| {
        DocError::InvalidArgument(format!("sequence space exhausted in container {container}"))
    })?;
    debug!(container, scanned = names.len(), next, "sequence allocated");
    Ok(next)
}
