//! Document identity: the [`Document`] and [`Identifier`] traits and the
//! mapping between identifiers and item names.
//!
//! A persisted document lives under `<id>.json`, and its identity field must
//! always equal that stem. The store enforces this on every read and write;
//! document types only have to say where their identifier lives.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// Extension appended to every document item name.
pub const ITEM_EXTENSION: &str = "json";

/// Default serialized name of the identity field.
pub const DEFAULT_ID_FIELD: &str = "Id";

/// A type usable as a document identifier.
///
/// Implemented for `String` and [`Uuid`]; those are the only identifier
/// representations documents may use.
pub trait Identifier: Clone + Send + Sync + 'static {
    /// Build an identifier from a freshly allocated UUID.
    fn from_uuid(uuid: Uuid) -> Self;

    /// Parse an item-name stem back into an identifier.
    ///
    /// Returns `None` if the stem is not representable (e.g. a sequence
    /// number read as a UUID).
    fn from_stem(stem: &str) -> Option<Self>;

    /// The item-name stem for this identifier.
    fn to_stem(&self) -> String;
}

impl Identifier for String {
    fn from_uuid(uuid: Uuid) -> Self {
        uuid.to_string()
    }

    fn from_stem(stem: &str) -> Option<Self> {
        Some(stem.to_string())
    }

    fn to_stem(&self) -> String {
        self.clone()
    }
}

impl Identifier for Uuid {
    fn from_uuid(uuid: Uuid) -> Self {
        uuid
    }

    fn from_stem(stem: &str) -> Option<Self> {
        Uuid::parse_str(stem).ok()
    }

    fn to_stem(&self) -> String {
        self.to_string()
    }
}

/// A typed JSON document with a single identity field.
///
/// # Example
///
/// ```
/// use blobdoc_core::Document;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// #[serde(rename_all = "PascalCase")]
/// struct Task {
///     #[serde(default)]
///     id: String,
///     status: String,
/// }
///
/// impl Document for Task {
///     type Id = String;
///
///     fn id(&self) -> Option<&String> {
///         Some(&self.id).filter(|id| !id.is_empty())
///     }
///
///     fn set_id(&mut self, id: String) {
///         self.id = id;
///     }
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The identifier representation.
    type Id: Identifier;

    /// Serialized name of the identity field.
    const ID_FIELD: &'static str = DEFAULT_ID_FIELD;

    /// The current identifier, if one has been assigned.
    fn id(&self) -> Option<&Self::Id>;

    /// Overwrite the identifier.
    fn set_id(&mut self, id: Self::Id);
}

/// Item name for a document stem: `<stem>.json`.
pub fn item_name(stem: &str) -> String {
    format!("{stem}.{ITEM_EXTENSION}")
}

/// The file stem of an item name: directory prefix and last extension
/// removed.
///
/// ```
/// use blobdoc_core::document::item_stem;
///
/// assert_eq!(item_stem("42.json"), "42");
/// assert_eq!(item_stem("2024/q1/report.json"), "report");
/// assert_eq!(item_stem("archive.tar.gz"), "archive.tar");
/// assert_eq!(item_stem("README"), "README");
/// ```
pub fn item_stem(name: &str) -> &str {
    let file = name.rsplit('/').next().unwrap_or(name);
    match file.rfind('.') {
        Some(dot) => &file[..dot],
        None => file,
    }
}
