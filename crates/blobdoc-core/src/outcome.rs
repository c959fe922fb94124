//! Result types for operations whose success has more than one shape.

use serde::Serialize;

/// Outcome of looking up one field of one item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Lookup {
    /// The item exists and has the field; carries the field's text.
    Found(String),
    /// The item does not exist.
    ItemMissing,
    /// The item exists but has no such top-level field.
    FieldAbsent,
}

/// Outcome of deleting an item. Deleting an absent item is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The item existed and has been removed.
    Deleted,
    /// The item did not exist; nothing was changed.
    NothingToDelete,
}

impl DeleteOutcome {
    /// Returns `true` if an item was removed.
    pub fn is_deleted(self) -> bool {
        self == DeleteOutcome::Deleted
    }
}

/// Where a sequentially posted payload landed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostReceipt {
    /// The item name written, `<sequence>.json`.
    pub item: String,
    /// The allocated sequence number.
    pub sequence: u64,
}

/// Where a moved or renamed item landed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    pub from_container: String,
    pub from_item: String,
    pub to_container: String,
    pub to_item: String,
    /// Whether the destination container was created by this transfer.
    pub created_container: bool,
}
