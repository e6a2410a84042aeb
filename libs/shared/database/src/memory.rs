use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;
use tracing::debug;

use crate::store::{DocumentStore, StoreError};

#[derive(Default)]
struct Collections {
    documents: HashMap<String, Vec<Document>>,
    unique_fields: HashMap<String, Vec<String>>,
}

impl Collections {
    fn check_unique(&self, collection: &str, candidate: &Document) -> Result<(), StoreError> {
        let Some(fields) = self.unique_fields.get(collection) else {
            return Ok(());
        };
        let Some(existing) = self.documents.get(collection) else {
            return Ok(());
        };
        let candidate_id = candidate.get("_id");

        for field in fields {
            let value = match candidate.get(field) {
                Some(Bson::Null) | None => continue,
                Some(value) => value,
            };

            let clash = existing
                .iter()
                .filter(|doc| doc.get("_id") != candidate_id)
                .any(|doc| doc.get(field) == Some(value));

            if clash {
                return Err(StoreError::DuplicateKey(format!(
                    "{}.{} already holds {}",
                    collection, field, value
                )));
            }
        }

        Ok(())
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

/// Process-local document store. Backs the test suites and
/// `DATABASE_BACKEND=memory`; data lives as long as the store does.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.inner
            .read()
            .await
            .documents
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let inner = self.inner.read().await;

        Ok(inner
            .documents
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| matches(doc, &filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError> {
        let inner = self.inner.read().await;

        Ok(inner
            .documents
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches(doc, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let id = document
            .get_object_id("_id")
            .map_err(|_| StoreError::Validation("document has no _id".to_string()))?;

        let mut inner = self.inner.write().await;

        let id_taken = inner
            .documents
            .get(collection)
            .is_some_and(|docs| docs.iter().any(|doc| doc.get_object_id("_id").ok() == Some(id)));
        if id_taken {
            return Err(StoreError::DuplicateKey(format!("{}._id already holds {}", collection, id)));
        }

        inner.check_unique(collection, &document)?;
        inner
            .documents
            .entry(collection.to_string())
            .or_default()
            .push(document);

        debug!("Inserted {} into {}", id, collection);
        Ok(())
    }

    async fn replace_one(&self, collection: &str, id: ObjectId, mut document: Document) -> Result<(), StoreError> {
        document.insert("_id", id);

        let mut inner = self.inner.write().await;
        inner.check_unique(collection, &document)?;

        let slot = inner
            .documents
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.get_object_id("_id").ok() == Some(id)))
            .ok_or_else(|| StoreError::NotFound(format!("{} {}", collection, id.to_hex())))?;

        *slot = document;
        Ok(())
    }

    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let fields = inner.unique_fields.entry(collection.to_string()).or_default();

        if !fields.iter().any(|f| f == field) {
            fields.push(field.to_string());
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use mongodb::bson::doc;

    fn user(email: &str) -> Document {
        doc! { "_id": ObjectId::new(), "name": "Ada", "email": email }
    }

    #[tokio::test]
    async fn test_find_filters_on_field_equality() {
        let store = MemoryStore::new();
        store.insert_one("users", user("a@example.com")).await.unwrap();
        store.insert_one("users", user("b@example.com")).await.unwrap();

        let all = store.find("users", Document::new()).await.unwrap();
        assert_eq!(all.len(), 2);

        let found = store
            .find_one("users", doc! { "email": "b@example.com" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_str("email").unwrap(), "b@example.com");

        let missing = store.find_one("users", doc! { "email": "c@example.com" }).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        assert!(store.find("nothing", Document::new()).await.unwrap().is_empty());
        assert_eq!(store.count("nothing").await, 0);
    }

    #[tokio::test]
    async fn test_unique_index_rejects_duplicates() {
        let store = MemoryStore::new();
        store.ensure_unique_index("users", "email").await.unwrap();
        store.insert_one("users", user("a@example.com")).await.unwrap();

        let result = store.insert_one("users", user("a@example.com")).await;

        assert_matches!(result, Err(StoreError::DuplicateKey(_)));
        assert_eq!(store.count("users").await, 1);
    }

    #[tokio::test]
    async fn test_replace_keeps_own_unique_value() {
        let store = MemoryStore::new();
        store.ensure_unique_index("users", "email").await.unwrap();
        let original = user("a@example.com");
        let id = original.get_object_id("_id").unwrap();
        store.insert_one("users", original).await.unwrap();

        store
            .replace_one("users", id, doc! { "name": "Grace", "email": "a@example.com" })
            .await
            .unwrap();

        let stored = store.find_one("users", doc! { "_id": id }).await.unwrap().unwrap();
        assert_eq!(stored.get_str("name").unwrap(), "Grace");
        assert_eq!(store.count("users").await, 1);
    }

    #[tokio::test]
    async fn test_replace_missing_document_fails() {
        let store = MemoryStore::new();
        let result = store.replace_one("users", ObjectId::new(), doc! { "name": "x" }).await;
        assert_matches!(result, Err(StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_insert_requires_id() {
        let store = MemoryStore::new();
        let result = store.insert_one("users", doc! { "name": "x" }).await;
        assert_matches!(result, Err(StoreError::Validation(_)));
    }
}
