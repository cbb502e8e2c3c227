//! Document storage backends.
//!
//! The [`Seeder`](crate::db::Seeder) writes through the [`DocumentStore`] trait so the
//! same seeding run can target MongoDB ([`MongoStore`]) or an in-process collection
//! ([`MemoryStore`]).

mod memory;
mod mongo;

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use thiserror::Error;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Inserted id is not an ObjectId: {0}")]
    UnexpectedId(Bson),
    #[error("Write rejected: {0}")]
    WriteRejected(String),
    #[error("Store is closed")]
    Closed,
}

/// A single collection of heterogeneous documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Deletes every document, returning how many were removed.
    async fn clear(&self) -> Result<u64, StoreError>;

    /// Inserts one document and returns its generated id.
    async fn insert(&self, document: Document) -> Result<ObjectId, StoreError>;

    /// Returns every document in the collection.
    async fn find_all(&self) -> Result<Vec<Document>, StoreError>;

    /// Releases the underlying connection. Safe to call more than once.
    async fn close(&self);
}
