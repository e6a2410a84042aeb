use async_trait::async_trait;
use mongodb::bson::{self, oid::ObjectId, Document};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Backend(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<bson::de::Error> for StoreError {
    fn from(err: bson::de::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// A schema-less document database: named collections of BSON documents,
/// addressed by top-level field equality filters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError>;

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError>;

    /// Inserts a document that already carries its `_id`.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError>;

    /// Replaces the document whose `_id` is `id`.
    async fn replace_one(&self, collection: &str, id: ObjectId, document: Document) -> Result<(), StoreError>;

    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
