//! MongoDB implementation of [`DocumentStore`].

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Collection, IndexModel};
use tracing::{info, warn};

use crate::errors::StoreError;
use crate::interfaces::DocumentStore;
use permits_etl_shared::CuratedDocument;

/// Name of the curated document collection.
pub const CURATED_COLLECTION: &str = "permits_curated";

/// MongoDB connection configuration.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl MongoConfig {
    fn connection_uri(&self) -> String {
        format!(
            "mongodb://{}:{}@{}:{}/",
            self.user, self.password, self.host, self.port
        )
    }
}

/// MongoDB-backed curated document store.
pub struct MongoDocumentStore {
    collection: Collection<CuratedDocument>,
}

impl MongoDocumentStore {
    /// Connect to MongoDB and bind the curated collection.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(config.connection_uri())
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let collection = client
            .database(&config.database)
            .collection(CURATED_COLLECTION);

        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connected to MongoDB"
        );

        Ok(Self { collection })
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn replace_all(&self, documents: &[CuratedDocument]) -> Result<u64, StoreError> {
        self.collection
            .delete_many(doc! {})
            .await
            .map_err(|e| StoreError::write(e.to_string()))?;

        if documents.is_empty() {
            warn!(collection = %CURATED_COLLECTION, "No curated documents to insert");
        } else {
            self.collection
                .insert_many(documents)
                .await
                .map_err(|e| StoreError::write(e.to_string()))?;
            info!(
                collection = %CURATED_COLLECTION,
                count = documents.len(),
                "Replaced curated collection contents"
            );
        }

        let geo_index = IndexModel::builder()
            .keys(doc! { "GEO_POINT": "2dsphere" })
            .build();
        self.collection
            .create_index(geo_index)
            .await
            .map_err(|e| StoreError::write(e.to_string()))?;

        Ok(documents.len() as u64)
    }

    async fn fetch_all(&self) -> Result<Vec<CuratedDocument>, StoreError> {
        // Strip Mongo's internal _id so the projection downstream sees
        // only pipeline fields.
        let cursor = self
            .collection
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .await
            .map_err(|e| StoreError::read(e.to_string()))?;

        let documents: Vec<CuratedDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::read(e.to_string()))?;

        info!(
            collection = %CURATED_COLLECTION,
            count = documents.len(),
            "Fetched curated documents"
        );
        Ok(documents)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(|e| StoreError::read(e.to_string()))
    }
}
