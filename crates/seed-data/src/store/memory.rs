use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use bson::{Document, oid::ObjectId};

use super::{DocumentStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    documents: Vec<Document>,
    inserts: usize,
    fail_on_insert: Option<usize>,
    closed: bool,
}

/// In-process collection, shared between clones.
///
/// Useful for dry runs and for exercising seeding failures: [`MemoryStore::fail_on_insert`]
/// makes the n-th insert (1-based, counted over the store's lifetime) fail.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the n-th insert made through this store.
    pub fn fail_on_insert(self, n: usize) -> Self {
        self.lock().fail_on_insert = Some(n);
        self
    }

    /// Snapshot of the stored documents in insertion order.
    pub fn documents(&self) -> Vec<Document> {
        self.lock().documents.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().documents.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Reopens a closed store so another run can use it. Stored documents are kept.
    pub fn reopen(&self) {
        self.lock().closed = false;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn clear(&self) -> Result<u64, StoreError> {
        let mut inner = self.lock();
        if inner.closed {
            return Err(StoreError::Closed);
        }
        let deleted = inner.documents.len() as u64;
        inner.documents.clear();
        Ok(deleted)
    }

    async fn insert(&self, mut document: Document) -> Result<ObjectId, StoreError> {
        let mut inner = self.lock();
        if inner.closed {
            return Err(StoreError::Closed);
        }

        inner.inserts += 1;
        if inner.fail_on_insert == Some(inner.inserts) {
            return Err(StoreError::WriteRejected(format!("insert #{} refused", inner.inserts)));
        }

        let id = match document.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };
        inner.documents.push(document);
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        let inner = self.lock();
        if inner.closed {
            return Err(StoreError::Closed);
        }
        Ok(inner.documents.clone())
    }

    async fn close(&self) {
        self.lock().closed = true;
    }
}
