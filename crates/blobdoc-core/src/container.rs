//! Per-container document operations: create, read, update, delete, raw
//! access, sequential posting, and plain byte uploads.
//!
//! Container-wide scans (merge and search) live in [`crate::scan`].

use std::sync::Arc;

use blobdoc_store::{BlobStore, StoreError};
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::codec::{check_id_field, decode, encode, parse_json, stamp_id};
use crate::config::StoreOptions;
use crate::document::{item_name, Document, Identifier, DEFAULT_ID_FIELD};
use crate::error::{DocError, DocResult};
use crate::ident::{allocate_sequence, random_id};
use crate::outcome::{DeleteOutcome, PostReceipt};

/// Document operations over one container.
///
/// Obtained from [`DocumentStore::container`](crate::DocumentStore::container).
/// The container owns the mapping between identifiers and item names:
/// documents are stored under `<id>.json` and their identity field always
/// equals that stem.
#[derive(Clone)]
pub struct Container {
    pub(crate) backend: Arc<dyn BlobStore>,
    pub(crate) name: String,
    pub(crate) options: StoreOptions,
}

impl Container {
    pub(crate) fn new(backend: Arc<dyn BlobStore>, name: String, options: StoreOptions) -> Self {
        Self {
            backend,
            name,
            options,
        }
    }

    /// The container name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All item names, in whatever order the backend reports them.
    pub async fn list(&self) -> DocResult<Vec<String>> {
        Ok(self.backend.list_items(&self.name).await?)
    }

    /// Check whether an item exists.
    pub async fn exists(&self, item: &str) -> DocResult<bool> {
        Ok(self.backend.item_exists(&self.name, item).await?)
    }

    /// Fetch and decode one item, pinning its identity to the item name.
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn get<T: Document>(&self, item: &str) -> DocResult<T> {
        let data = self.backend.get_item(&self.name, item).await?;
        decode(&data, item)
    }

    /// Fetch and decode the document stored for identifier `id`.
    pub async fn get_by_id<T: Document>(&self, id: &T::Id) -> DocResult<T> {
        self.get(&item_name(&id.to_stem())).await
    }

    /// Fetch an item's raw text. `Ok(None)` if the item is absent.
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn get_raw(&self, item: &str) -> DocResult<Option<String>> {
        match self.backend.get_item(&self.name, item).await {
            Ok(data) => Ok(Some(utf8(data, item)?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch an item's raw text, failing with `NotFound` if absent.
    pub async fn read_text(&self, item: &str) -> DocResult<String> {
        let data = self.backend.get_item(&self.name, item).await?;
        utf8(data, item)
    }

    /// Store a new document under a freshly allocated identifier.
    ///
    /// The identifier is stamped onto the document before encoding, and the
    /// write is a conditional create. Returns the document as stored.
    #[instrument(skip(self, document), fields(container = %self.name))]
    pub async fn create<T: Document>(&self, mut document: T) -> DocResult<T> {
        let id = T::Id::from_uuid(random_id());
        let item = item_name(&id.to_stem());
        document.set_id(id);
        let data = encode(&document)?;
        self.backend.put_item(&self.name, &item, data, false).await?;
        info!(item = %item, "document created");
        Ok(document)
    }

    /// Store a new untyped JSON object under a freshly allocated identifier.
    ///
    /// Fails with `UnsupportedIdentifierType` if the object already carries
    /// an `Id` field that is not a string.
    #[instrument(skip(self, value), fields(container = %self.name))]
    pub async fn create_value(&self, value: Value) -> DocResult<Value> {
        let Value::Object(mut map) = value else {
            return Err(DocError::InvalidArgument(
                "document payload must be a JSON object".into(),
            ));
        };
        check_id_field(&map)?;
        let id = random_id().to_string();
        stamp_id(&mut map, DEFAULT_ID_FIELD, &id);
        let value = Value::Object(map);
        let item = item_name(&id);
        self.backend
            .put_item(&self.name, &item, encode(&value)?, false)
            .await?;
        info!(item = %item, "document created");
        Ok(value)
    }

    /// Replace the document stored for `item_id` in full.
    ///
    /// The stored identity field is forced to `item_id` whatever `document`
    /// carries. Fails with `NotFound` if there is nothing to replace.
    #[instrument(skip(self, document), fields(container = %self.name))]
    pub async fn update<T: Document>(&self, item_id: &str, document: &T) -> DocResult<T> {
        if T::Id::from_stem(item_id).is_none() {
            return Err(DocError::InvalidArgument(format!(
                "{item_id:?} is not a valid identifier for this document type"
            )));
        }
        let value = serde_json::to_value(document)
            .map_err(|e| DocError::InvalidArgument(format!("cannot encode document: {e}")))?;
        let data = self.replace(item_id, value, T::ID_FIELD).await?;
        decode(&data, &item_name(item_id))
    }

    /// Replace the untyped document stored for `item_id` in full.
    #[instrument(skip(self, value), fields(container = %self.name))]
    pub async fn update_value(&self, item_id: &str, value: Value) -> DocResult<Value> {
        let data = self.replace(item_id, value, DEFAULT_ID_FIELD).await?;
        parse_json(&data, &item_name(item_id))
    }

    async fn replace(&self, item_id: &str, value: Value, id_field: &str) -> DocResult<Bytes> {
        if item_id.is_empty() {
            return Err(DocError::InvalidArgument(
                "item id must not be empty".into(),
            ));
        }
        let item = item_name(item_id);
        if !self.backend.item_exists(&self.name, &item).await? {
            return Err(DocError::not_found(&self.name, &item));
        }
        let Value::Object(mut map) = value else {
            return Err(DocError::InvalidArgument(
                "document payload must be a JSON object".into(),
            ));
        };
        stamp_id(&mut map, id_field, item_id);
        let data = encode(&Value::Object(map))?;
        self.backend
            .put_item(&self.name, &item, data.clone(), true)
            .await?;
        debug!(item = %item, "document replaced");
        Ok(data)
    }

    /// Delete an item if it exists.
    ///
    /// Deleting an absent item is not an error; it reports
    /// [`DeleteOutcome::NothingToDelete`].
    #[instrument(skip(self), fields(container = %self.name))]
    pub async fn delete(&self, item: &str) -> DocResult<DeleteOutcome> {
        if item.is_empty() {
            return Err(DocError::InvalidArgument(
                "item name must not be empty".into(),
            ));
        }
        if !self.backend.item_exists(&self.name, item).await? {
            debug!("nothing to delete");
            return Ok(DeleteOutcome::NothingToDelete);
        }
        if self.backend.delete_item_if_exists(&self.name, item).await? {
            info!("item deleted");
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::NothingToDelete)
        }
    }

    /// Store a raw JSON payload under the next free sequence number.
    ///
    /// Creates the container if needed. The payload is written verbatim
    /// after checking it parses. A name lost to a concurrent poster is
    /// detected by the conditional create and retried with a fresh scan, up
    /// to [`StoreOptions::post_attempts`] times.
    #[instrument(skip(self, json), fields(container = %self.name))]
    pub async fn open_post(&self, json: &str) -> DocResult<PostReceipt> {
        if json.trim().is_empty() {
            return Err(DocError::InvalidArgument(
                "payload must not be empty".into(),
            ));
        }
        parse_json(json.as_bytes(), "<payload>")?;
        self.backend.create_container_if_absent(&self.name).await?;

        let data = Bytes::copy_from_slice(json.as_bytes());
        let mut last_item = String::new();
        for attempt in 1..=self.options.post_attempts {
            let sequence = allocate_sequence(self.backend.as_ref(), &self.name).await?;
            let item = item_name(&sequence.to_string());
            match self
                .backend
                .put_item(&self.name, &item, data.clone(), false)
                .await
            {
                Ok(()) => {
                    info!(item = %item, "payload posted");
                    return Ok(PostReceipt { item, sequence });
                }
                Err(StoreError::ItemAlreadyExists { .. }) => {
                    warn!(item = %item, attempt, "sequence taken by a concurrent writer");
                    last_item = item;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(DocError::AlreadyExists {
            container: self.name.clone(),
            item: last_item,
        })
    }

    /// Upload an arbitrary byte payload, creating the container if needed
    /// and overwriting any existing item.
    #[instrument(skip(self, data), fields(container = %self.name, size = data.len()))]
    pub async fn upload(&self, item: &str, data: Bytes) -> DocResult<()> {
        if data.is_empty() {
            return Err(DocError::InvalidArgument(
                "payload must not be empty".into(),
            ));
        }
        self.backend.create_container_if_absent(&self.name).await?;
        self.backend.put_item(&self.name, item, data, true).await?;
        info!("payload uploaded");
        Ok(())
    }

    /// Download an item's bytes, failing with `NotFound` if absent.
    pub async fn download(&self, item: &str) -> DocResult<Bytes> {
        Ok(self.backend.get_item(&self.name, item).await?)
    }
}

fn utf8(data: Bytes, item: &str) -> DocResult<String> {
    String::from_utf8(data.to_vec()).map_err(|e| DocError::decode(item, e))
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::item_stem;
    use crate::store::DocumentStore;
    use crate::testing::{store_with, Invoice, Task};
    use async_trait::async_trait;
    use blobdoc_store::{InMemoryBlobStore, StoreResult};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // -----------------------------------------------------------------------
    // Create / get
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn created_id_round_trips_through_storage() {
        let store = store_with("tasks").await;
        let tasks = store.container("tasks");
        let created = tasks.create(Task::new("write", "open")).await.unwrap();
        let id = created.id().cloned().expect("id assigned");

        let fetched: Task = tasks.get(&item_name(&id)).await.unwrap();
        assert_eq!(fetched.id, id);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_overrides_caller_id() {
        let store = store_with("tasks").await;
        let tasks = store.container("tasks");
        let mut task = Task::new("x", "open");
        task.id = "chosen-by-caller".into();
        let created = tasks.create(task).await.unwrap();
        assert_ne!(created.id, "chosen-by-caller");
        assert_eq!(tasks.list().await.unwrap(), vec![item_name(&created.id)]);
    }

    #[tokio::test]
    async fn uuid_documents_round_trip() {
        let store = store_with("invoices").await;
        let invoices = store.container("invoices");
        let created = invoices
            .create(Invoice {
                id: uuid::Uuid::nil(),
                amount: 120,
            })
            .await
            .unwrap();
        assert!(!created.id.is_nil());
        let fetched: Invoice = invoices.get_by_id::<Invoice>(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_pins_id_even_when_payload_disagrees() {
        let store = store_with("tasks").await;
        let tasks = store.container("tasks");
        store
            .backend()
            .put_item(
                "tasks",
                "real.json",
                Bytes::from_static(br#"{"Id":"forged","Title":"t"}"#),
                true,
            )
            .await
            .unwrap();
        let task: Task = tasks.get("real.json").await.unwrap();
        assert_eq!(task.id, "real");
    }

    #[tokio::test]
    async fn get_missing_item_is_not_found() {
        let store = store_with("tasks").await;
        let err = store
            .container("tasks")
            .get::<Task>("nope.json")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn create_in_missing_container_is_not_found() {
        let store = DocumentStore::in_memory();
        let err = store
            .container("tasks")
            .create(Task::new("x", "open"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn create_value_assigns_id() {
        let store = store_with("notes").await;
        let notes = store.container("notes");
        let created = notes.create_value(json!({"text": "hi"})).await.unwrap();
        let id = created["Id"].as_str().unwrap().to_string();
        let raw = notes.get_raw(&item_name(&id)).await.unwrap().unwrap();
        let stored: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, created);
    }

    #[tokio::test]
    async fn create_value_rejects_numeric_id() {
        let store = store_with("notes").await;
        let err = store
            .container("notes")
            .create_value(json!({"Id": 5, "text": "hi"}))
            .await
            .unwrap_err();
        assert!(matches!(err, DocError::UnsupportedIdentifierType { .. }));
    }

    #[tokio::test]
    async fn create_value_rejects_non_object() {
        let store = store_with("notes").await;
        let err = store
            .container("notes")
            .create_value(json!([1, 2]))
            .await
            .unwrap_err();
        assert!(matches!(err, DocError::InvalidArgument(_)));
    }

    // -----------------------------------------------------------------------
    // Raw access
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn get_raw_distinguishes_absence() {
        let store = store_with("notes").await;
        let notes = store.container("notes");
        assert_eq!(notes.get_raw("a.json").await.unwrap(), None);
        assert_eq!(store.container("other").get_raw("a.json").await.unwrap(), None);
        notes.upload("a.json", Bytes::from_static(b"{\"n\":1}")).await.unwrap();
        assert_eq!(
            notes.get_raw("a.json").await.unwrap().as_deref(),
            Some("{\"n\":1}")
        );
    }

    #[tokio::test]
    async fn read_text_requires_item() {
        let store = store_with("notes").await;
        let err = store.container("notes").read_text("a.json").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn read_text_rejects_invalid_utf8() {
        let store = store_with("notes").await;
        let notes = store.container("notes");
        notes
            .upload("bin.dat", Bytes::from_static(&[0xff, 0xfe]))
            .await
            .unwrap();
        assert!(matches!(
            notes.read_text("bin.dat").await,
            Err(DocError::Decode { .. })
        ));
        assert_eq!(
            notes.download("bin.dat").await.unwrap(),
            Bytes::from_static(&[0xff, 0xfe])
        );
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn update_pins_existing_id() {
        let store = store_with("tasks").await;
        let tasks = store.container("tasks");
        let created = tasks.create(Task::new("draft", "open")).await.unwrap();

        let mut replacement = Task::new("final", "done");
        replacement.id = "someone-else".into();
        let updated = tasks.update(&created.id, &replacement).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "final");

        let raw = tasks.get_raw(&item_name(&created.id)).await.unwrap().unwrap();
        let stored: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored["Id"], json!(created.id));
        assert_eq!(stored["Status"], json!("done"));
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let store = store_with("tasks").await;
        let err = store
            .container("tasks")
            .update("ghost", &Task::new("x", "open"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.container("tasks").list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_empty_id() {
        let store = store_with("tasks").await;
        let err = store
            .container("tasks")
            .update("", &Task::new("x", "open"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn update_uuid_document_rejects_non_uuid_id() {
        let store = store_with("invoices").await;
        let err = store
            .container("invoices")
            .update(
                "7",
                &Invoice {
                    id: uuid::Uuid::nil(),
                    amount: 1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DocError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn update_value_inserts_id_field() {
        let store = store_with("notes").await;
        let notes = store.container("notes");
        notes.upload("n1.json", Bytes::from_static(b"{}")).await.unwrap();
        let updated = notes
            .update_value("n1", json!({"text": "new"}))
            .await
            .unwrap();
        assert_eq!(updated, json!({"Id": "n1", "text": "new"}));
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = store_with("tasks").await;
        let tasks = store.container("tasks");
        let created = tasks.create(Task::new("x", "open")).await.unwrap();
        let item = item_name(&created.id);

        assert_eq!(tasks.delete(&item).await.unwrap(), DeleteOutcome::Deleted);
        assert!(!tasks.exists(&item).await.unwrap());
        assert_eq!(
            tasks.delete(&item).await.unwrap(),
            DeleteOutcome::NothingToDelete
        );
    }

    #[tokio::test]
    async fn delete_in_missing_container_is_nothing_to_delete() {
        let store = DocumentStore::in_memory();
        let outcome = store.container("tasks").delete("a.json").await.unwrap();
        assert_eq!(outcome, DeleteOutcome::NothingToDelete);
    }

    // -----------------------------------------------------------------------
    // Sequential posting
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn open_post_numbers_sequentially() {
        let store = DocumentStore::in_memory();
        let posts = store.container("posts");
        let first = posts.open_post(r#"{"a":1}"#).await.unwrap();
        let second = posts.open_post(r#"{"a":2}"#).await.unwrap();
        assert_eq!(first, PostReceipt { item: "0.json".into(), sequence: 0 });
        assert_eq!(second.sequence, 1);
        assert_eq!(posts.read_text("1.json").await.unwrap(), r#"{"a":2}"#);
    }

    #[tokio::test]
    async fn open_post_skips_past_existing_numbers() {
        let store = store_with("posts").await;
        let posts = store.container("posts");
        for name in ["0.json", "1.json", "2.json", "readme.json"] {
            posts.upload(name, Bytes::from_static(b"{}")).await.unwrap();
        }
        let receipt = posts.open_post("[]").await.unwrap();
        assert_eq!(receipt.item, "3.json");
        assert_eq!(item_stem(&receipt.item), "3");
    }

    #[tokio::test]
    async fn open_post_rejects_empty_and_malformed() {
        let store = DocumentStore::in_memory();
        let posts = store.container("posts");
        assert!(matches!(
            posts.open_post("   ").await,
            Err(DocError::InvalidArgument(_))
        ));
        assert!(matches!(
            posts.open_post("{oops").await,
            Err(DocError::Decode { .. })
        ));
        assert!(!store.container_exists("posts").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_posts_get_distinct_numbers() {
        let store = DocumentStore::in_memory();
        store.create_container("posts").await.unwrap();
        let posts = store.container("posts");
        let handles: Vec<_> = (0..3)
            .map(|i| {
                let posts = posts.clone();
                tokio::spawn(async move { posts.open_post(&format!("{{\"n\":{i}}}")).await })
            })
            .collect();
        let mut sequences = Vec::new();
        for handle in handles {
            let receipt = handle.await.expect("task should not panic").unwrap();
            sequences.push(receipt.sequence);
        }
        sequences.sort_unstable();
        assert_eq!(sequences, vec![0, 1, 2]);
        assert_eq!(posts.list().await.unwrap().len(), 3);
    }

    /// Hides the highest numeric item from listings, so the allocator keeps
    /// proposing a name that is already taken.
    struct StaleListing {
        inner: InMemoryBlobStore,
        stale_listings: AtomicUsize,
        puts: AtomicUsize,
    }

    impl StaleListing {
        fn new(inner: InMemoryBlobStore, stale_listings: usize) -> Self {
            Self {
                inner,
                stale_listings: AtomicUsize::new(stale_listings),
                puts: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl BlobStore for StaleListing {
        async fn list_containers(&self) -> StoreResult<Vec<String>> {
            self.inner.list_containers().await
        }
        async fn create_container(&self, container: &str) -> StoreResult<()> {
            self.inner.create_container(container).await
        }
        async fn delete_container(&self, container: &str) -> StoreResult<bool> {
            self.inner.delete_container(container).await
        }
        async fn container_exists(&self, container: &str) -> StoreResult<bool> {
            self.inner.container_exists(container).await
        }
        async fn list_items(&self, container: &str) -> StoreResult<Vec<String>> {
            let mut names = self.inner.list_items(container).await?;
            let stale = self
                .stale_listings
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if stale {
                let highest = names
                    .iter()
                    .filter_map(|n| Some((item_stem(n).parse::<u64>().ok()?, n.clone())))
                    .max();
                if let Some((_, name)) = highest {
                    names.retain(|n| *n != name);
                }
            }
            Ok(names)
        }
        async fn item_exists(&self, container: &str, item: &str) -> StoreResult<bool> {
            self.inner.item_exists(container, item).await
        }
        async fn get_item(&self, container: &str, item: &str) -> StoreResult<Bytes> {
            self.inner.get_item(container, item).await
        }
        async fn put_item(
            &self,
            container: &str,
            item: &str,
            data: Bytes,
            overwrite: bool,
        ) -> StoreResult<()> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.inner.put_item(container, item, data, overwrite).await
        }
        async fn delete_item_if_exists(&self, container: &str, item: &str) -> StoreResult<bool> {
            self.inner.delete_item_if_exists(container, item).await
        }
        async fn copy_item(
            &self,
            from_container: &str,
            from_item: &str,
            to_container: &str,
            to_item: &str,
        ) -> StoreResult<()> {
            self.inner
                .copy_item(from_container, from_item, to_container, to_item)
                .await
        }
    }

    async fn posts_with_stale_listing(stale_listings: usize) -> (Arc<StaleListing>, Container) {
        let inner = InMemoryBlobStore::new();
        inner.create_container("posts").await.unwrap();
        for name in ["0.json", "1.json"] {
            inner
                .put_item("posts", name, Bytes::from_static(b"{}"), true)
                .await
                .unwrap();
        }
        let backend = Arc::new(StaleListing::new(inner, stale_listings));
        let store = DocumentStore::new(backend.clone());
        (backend, store.container("posts"))
    }

    #[tokio::test]
    async fn open_post_retries_after_collision() {
        let (backend, posts) = posts_with_stale_listing(1).await;
        let receipt = posts.open_post(r#"{"late":true}"#).await.unwrap();
        assert_eq!(receipt.sequence, 2);
        assert_eq!(backend.puts.load(Ordering::SeqCst), 2);
        assert_eq!(posts.read_text("1.json").await.unwrap(), "{}");
        assert_eq!(posts.read_text("2.json").await.unwrap(), r#"{"late":true}"#);
    }

    #[tokio::test]
    async fn open_post_gives_up_after_configured_attempts() {
        let (backend, posts) = posts_with_stale_listing(usize::MAX).await;
        let err = posts.open_post("{}").await.unwrap_err();
        assert!(matches!(err, DocError::AlreadyExists { ref item, .. } if item == "1.json"));
        assert_eq!(
            backend.puts.load(Ordering::SeqCst),
            StoreOptions::default().post_attempts as usize
        );
        assert_eq!(posts.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn open_post_rejects_exhausted_sequence() {
        let store = store_with("posts").await;
        let posts = store.container("posts");
        posts
            .upload(&format!("{}.json", u64::MAX), Bytes::from_static(b"{}"))
            .await
            .unwrap();
        assert!(matches!(
            posts.open_post("{}").await,
            Err(DocError::InvalidArgument(_))
        ));
    }

    // -----------------------------------------------------------------------
    // Upload / download
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn upload_creates_container_and_overwrites() {
        let store = DocumentStore::in_memory();
        let files = store.container("files");
        files.upload("doc.pdf", Bytes::from_static(b"%PDF-1")).await.unwrap();
        files.upload("doc.pdf", Bytes::from_static(b"%PDF-2")).await.unwrap();
        assert_eq!(
            files.download("doc.pdf").await.unwrap(),
            Bytes::from_static(b"%PDF-2")
        );
    }

    #[tokio::test]
    async fn upload_rejects_empty_payload() {
        let store = DocumentStore::in_memory();
        let err = store
            .container("files")
            .upload("doc.pdf", Bytes::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DocError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn download_missing_is_not_found() {
        let store = store_with("files").await;
        let err = store.container("files").download("x.pdf").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
