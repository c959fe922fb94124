//! Container-wide reads: merging every document and searching by field.
//!
//! Item names are sorted lexicographically before fetching, and fetches run
//! up to [`StoreOptions::scan_concurrency`](crate::StoreOptions) at a time
//! while results are yielded in that sorted order. An item deleted between
//! the listing and its fetch is skipped.

use blobdoc_store::BlobStore;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::codec::{decode, decode_value, field_text, lookup_field, parse_json};
use crate::container::Container;
use crate::document::{item_stem, Document};
use crate::error::{DocError, DocResult};
use crate::outcome::Lookup;

/// A lazily fetched, ordered stream of decoded items.
pub type DocumentStream<'a, T> = BoxStream<'a, DocResult<T>>;

impl Container {
    /// Item names sorted lexicographically.
    pub async fn sorted_names(&self) -> DocResult<Vec<String>> {
        let mut names = self.list().await?;
        names.sort_unstable();
        Ok(names)
    }

    /// Fetch `names` concurrently, yielding `(name, bytes)` in input order.
    fn fetch_ordered(&self, names: Vec<String>) -> BoxStream<'_, DocResult<(String, Bytes)>> {
        let backend = self.backend.as_ref();
        let container = self.name.as_str();
        stream::iter(names)
            .map(move |name| fetch_one(backend, container, name))
            .buffered(self.options.scan_concurrency)
            .try_filter_map(|fetched| async move { Ok(fetched) })
            .boxed()
    }

    /// Stream every item decoded as `T`, in item-name order.
    ///
    /// The first item that fails to decode ends the stream with that error.
    pub fn scan<T: Document>(&self) -> DocumentStream<'_, T> {
        stream::once(self.sorted_names())
            .map_ok(|names| self.fetch_ordered(names))
            .try_flatten()
            .and_then(|(name, data)| async move { decode::<T>(&data, &name) })
            .boxed()
    }

    /// Stream every item as a generic JSON object, in item-name order.
    pub fn scan_raw(&self) -> DocumentStream<'_, Value> {
        stream::once(self.sorted_names())
            .map_ok(|names| self.fetch_ordered(names))
            .try_flatten()
            .and_then(|(name, data)| async move { decode_value(&data, &name) })
            .boxed()
    }

    /// Decode every item as `T`, in item-name order.
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn merge_all<T: Document>(&self) -> DocResult<Vec<T>> {
        let documents: Vec<T> = self.scan().try_collect().await?;
        debug!(count = documents.len(), "container merged");
        Ok(documents)
    }

    /// Every item as one JSON array, in item-name order.
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn merge_all_raw(&self) -> DocResult<Value> {
        let documents: Vec<Value> = self.scan_raw().try_collect().await?;
        debug!(count = documents.len(), "container merged");
        Ok(Value::Array(documents))
    }

    /// Read one top-level field of one item as text.
    ///
    /// String values come back unquoted; any other JSON value comes back in
    /// its compact JSON form. The field name is matched exactly first and
    /// then case-insensitively.
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn search_field(&self, item: &str, field: &str) -> DocResult<Lookup> {
        let data = match self.backend.get_item(&self.name, item).await {
            Ok(data) => data,
            Err(e) if e.is_not_found() => return Ok(Lookup::ItemMissing),
            Err(e) => return Err(e.into()),
        };
        let value = parse_json(&data, item)?;
        let found = match &value {
            Value::Object(map) => lookup_field(map, field).map(field_text),
            _ => None,
        };
        Ok(found.map_or(Lookup::FieldAbsent, Lookup::Found))
    }

    /// Find the first item, in item-name order, whose top-level `field` is
    /// the string `value`. Returns that item's stem.
    ///
    /// Only string values match; numbers and other JSON values are never
    /// equal to `value` even when their text is. Non-object items are
    /// skipped, malformed ones fail the search.
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn search_by_field_value(
        &self,
        field: &str,
        value: &str,
    ) -> DocResult<Option<String>> {
        let names = self.sorted_names().await?;
        let mut fetched = self.fetch_ordered(names);
        while let Some((name, data)) = fetched.try_next().await? {
            let Value::Object(map) = parse_json(&data, &name)? else {
                continue;
            };
            if matches!(lookup_field(&map, field), Some(Value::String(s)) if s == value) {
                debug!(item = %name, "match found");
                return Ok(Some(item_stem(&name).to_string()));
            }
        }
        Ok(None)
    }
}

async fn fetch_one(
    backend: &dyn BlobStore,
    container: &str,
    name: String,
) -> DocResult<Option<(String, Bytes)>> {
    match backend.get_item(container, &name).await {
        Ok(data) => Ok(Some((name, data))),
        Err(e) if e.is_not_found() => {
            debug!(container, item = %name, "item vanished during scan");
            Ok(None)
        }
        Err(e) => Err(DocError::from(e)),
    }
}
