use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Client, Collection, Database, IndexModel,
};
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::store::{DocumentStore, StoreError};

const DUPLICATE_KEY_CODE: i32 = 11000;

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = err.kind.as_ref() {
            if write_error.code == DUPLICATE_KEY_CODE {
                return StoreError::DuplicateKey(write_error.message.clone());
            }
        }
        StoreError::Backend(err.to_string())
    }
}

pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.mongodb_uri).await?;
        let database = client.database(&config.mongodb_database);

        info!("Connected to MongoDB database {}", config.mongodb_database);

        Ok(Self { database })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        debug!("find in {} with {}", collection, filter);

        let cursor = self.collection(collection).find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError> {
        debug!("find_one in {} with {}", collection, filter);

        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        self.collection(collection).insert_one(document).await?;
        Ok(())
    }

    async fn replace_one(&self, collection: &str, id: ObjectId, document: Document) -> Result<(), StoreError> {
        let result = self
            .collection(collection)
            .replace_one(doc! { "_id": id }, document)
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(format!("{} {}", collection, id.to_hex())));
        }

        Ok(())
    }

    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError> {
        let mut keys = Document::new();
        keys.insert(field, 1);

        let index = IndexModel::builder()
            .keys(keys)
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection(collection).create_index(index).await?;
        debug!("Ensured unique index on {}.{}", collection, field);

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
