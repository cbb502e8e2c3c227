use async_trait::async_trait;
use bson::{Bson, Document, doc, oid::ObjectId};
use futures_util::TryStreamExt;
use mongodb::{Client, Collection};
use tracing::{debug, info};

use super::{DocumentStore, StoreError};
use crate::config::SeedConfig;

/// MongoDB-backed store for the marketplace collection.
#[derive(Clone, Debug)]
pub struct MongoStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoStore {
    /// Connects to the server and selects the configured collection.
    ///
    /// The driver connects lazily, so a `ping` is issued to surface an unreachable
    /// server here rather than on the first write.
    pub async fn connect(config: &SeedConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.mongodb_uri).await?;
        let database = client.database(&config.database);

        database.run_command(doc! { "ping": 1 }).await?;
        info!("MongoDB connected for seeding");

        let collection = database.collection::<Document>(&config.collection);
        debug!("Using collection {}.{}", config.database, config.collection);

        Ok(Self { client, collection })
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn clear(&self) -> Result<u64, StoreError> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    async fn insert(&self, document: Document) -> Result<ObjectId, StoreError> {
        let result = self.collection.insert_one(document).await?;
        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            other => Err(StoreError::UnexpectedId(other)),
        }
    }

    async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}
