//! Registry of ingested documents
//!
//! Maps document ids to their vector stores. Capacity is bounded; when a new
//! document would exceed it, the least recently used one is evicted.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info};

use super::VectorStore;
use crate::types::DocumentId;

/// An ingested document ready to be queried
#[derive(Debug)]
pub struct DocumentEntry {
    pub id: DocumentId,
    pub filename: Option<String>,
    pub title: Option<String>,
    pub store: VectorStore,
}

impl DocumentEntry {
    pub fn new(id: impl Into<DocumentId>, store: VectorStore) -> Self {
        Self {
            id: id.into(),
            filename: None,
            title: None,
            store,
        }
    }

    pub fn with_filename(mut self, filename: Option<String>) -> Self {
        self.filename = filename;
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }
}

/// Thread-safe, capacity-bounded document registry
pub struct DocumentStore {
    entries: Mutex<LruCache<DocumentId, Arc<DocumentEntry>>>,
}

impl DocumentStore {
    /// Create a registry holding at most `capacity` documents (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Register a document, returning the evicted entry if capacity was hit
    pub fn insert(&self, entry: DocumentEntry) -> Option<Arc<DocumentEntry>> {
        let id = entry.id.clone();
        let chunks = entry.store.len();
        let evicted = self.entries.lock().push(id.clone(), Arc::new(entry));

        debug!("Registered document {} ({} chunks)", id, chunks);

        match evicted {
            // push returns the old value when the key already existed
            Some((old_id, _)) if old_id == id => None,
            Some((old_id, old)) => {
                info!(
                    "Evicted least recently used document {} ({})",
                    old_id,
                    old.title
                        .as_deref()
                        .or(old.filename.as_deref())
                        .unwrap_or("unnamed")
                );
                Some(old)
            }
            None => None,
        }
    }

    /// Look up a document, marking it as recently used
    pub fn get(&self, id: &str) -> Option<Arc<DocumentEntry>> {
        self.entries.lock().get(id).cloned()
    }

    /// Whether a document is registered (does not affect recency)
    pub fn contains(&self, id: &str) -> bool {
        self.entries.lock().contains(id)
    }

    /// Remove a document
    pub fn remove(&self, id: &str) -> Option<Arc<DocumentEntry>> {
        self.entries.lock().pop(id)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }
}
