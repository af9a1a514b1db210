//! Record store
//!
//! `RecordStore` is the capability the rest of the crate talks to: load and
//! save the whole document, append a record, find the first matching record.
//! `Store` implements it on top of any `KeyValueSlot`.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::open(&config);       // file-backed
//! let store = Store::in_memory();         // test fake
//!
//! store.insert("users", json!({"id": "u_1", "email": "a@b.c"}))?;
//! let user = store.find_one("users", |u| u["id"] == "u_1");
//! ```
//!
//! Loading never fails: a missing, unreadable or corrupt document is
//! replaced by the seed defaults. The corrupt bytes are dropped on the next
//! save.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::document::{Document, STORAGE_KEY};
use crate::storage::{FileSlot, KeyValueSlot, MemorySlot, StorageResult};

/// Access to the persisted record document
pub trait RecordStore {
    /// Return the persisted document merged over the seed defaults
    fn load(&self) -> Document;

    /// Replace the persisted document
    fn save(&self, doc: &Document) -> StorageResult<()>;

    /// Append `record` to a collection and persist it
    ///
    /// The collection is created if absent. The record is not validated.
    fn insert(&self, collection: &str, record: Value) -> StorageResult<Value> {
        let mut doc = self.load();
        doc.push(collection, record.clone());
        self.save(&doc)?;
        debug!(collection, "record inserted");
        Ok(record)
    }

    /// First record of a collection, in insertion order, matching `predicate`
    fn find_one<P>(&self, collection: &str, mut predicate: P) -> Option<Value>
    where
        P: FnMut(&Value) -> bool,
        Self: Sized,
    {
        self.load()
            .collection(collection)?
            .iter()
            .find(|&record| predicate(record))
            .cloned()
    }

    /// Serialize and append a typed record
    fn insert_as<T>(&self, collection: &str, record: T) -> StorageResult<T>
    where
        T: Serialize,
        Self: Sized,
    {
        let value = serde_json::to_value(&record)?;
        self.insert(collection, value)?;
        Ok(record)
    }

    /// First record that deserializes as `T` and matches `predicate`
    fn find_one_as<T, P>(&self, collection: &str, mut predicate: P) -> Option<T>
    where
        T: DeserializeOwned,
        P: FnMut(&T) -> bool,
        Self: Sized,
    {
        self.load()
            .records_as::<T>(collection)
            .into_iter()
            .find(|record| predicate(record))
    }

    /// Every record of a collection that deserializes as `T`
    fn all_as<T>(&self, collection: &str) -> Vec<T>
    where
        T: DeserializeOwned,
        Self: Sized,
    {
        self.load().records_as(collection)
    }
}

/// Record store persisting the document to a single slot
pub struct Store<S = FileSlot> {
    slot: S,
}

impl Store<FileSlot> {
    /// Open a file-backed store under the configured data directory
    pub fn open(config: &Config) -> Self {
        Self::with_slot(FileSlot::from_config(config))
    }

    /// Path of the persisted document
    pub fn path(&self) -> std::path::PathBuf {
        self.slot.path_for(STORAGE_KEY)
    }

    /// Size in bytes of the persisted document, if one was saved
    pub fn stored_size(&self) -> Option<u64> {
        self.slot.size(STORAGE_KEY)
    }
}

impl Store<MemorySlot> {
    /// Create a store that lives only in memory
    pub fn in_memory() -> Self {
        Self::with_slot(MemorySlot::new())
    }
}

impl<S: KeyValueSlot> Store<S> {
    /// Create a store on top of any slot
    pub fn with_slot(slot: S) -> Self {
        Self { slot }
    }

    /// Get the underlying slot
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Whether a document has been saved at all
    pub fn is_persisted(&self) -> bool {
        matches!(self.slot.read(STORAGE_KEY), Ok(Some(_)))
    }

    /// The persisted document exactly as stored, without seed merging
    ///
    /// `Ok(None)` if nothing was saved yet. Unlike `load`, read failures and
    /// corrupt content are reported.
    pub fn stored_document(&self) -> StorageResult<Option<Document>> {
        match self.slot.read(STORAGE_KEY)? {
            Some(raw) => Document::from_json(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// Overwrite the stored document with the seed defaults
    pub fn reset(&self) -> StorageResult<Document> {
        let doc = Document::seed();
        self.save(&doc)?;
        Ok(doc)
    }
}

impl<S: KeyValueSlot> RecordStore for Store<S> {
    fn load(&self) -> Document {
        match self.stored_document() {
            Ok(Some(doc)) => doc.merged_over_seed(),
            Ok(None) => Document::seed(),
            Err(e) => {
                warn!(error = %e, "discarding stored document, using seed defaults");
                Document::seed()
            }
        }
    }

    fn save(&self, doc: &Document) -> StorageResult<()> {
        let raw = doc.to_json()?;
        self.slot.write(STORAGE_KEY, &raw)
    }
}
