use std::marker::PhantomData;
use std::sync::Arc;

use mongodb::bson::{self, oid::ObjectId, Document};
use tracing::debug;

use crate::model::Model;
use crate::store::{DocumentStore, StoreError};

/// Typed access to the collection of `T`.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _model: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _model: PhantomData,
        }
    }
}

impl<T: Model> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _model: PhantomData,
        }
    }

    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        for field in T::UNIQUE_FIELDS {
            self.store.ensure_unique_index(T::COLLECTION, field).await?;
        }
        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        self.find(Document::new()).await
    }

    pub async fn find(&self, filter: Document) -> Result<Vec<T>, StoreError> {
        let documents = self.store.find(T::COLLECTION, filter).await?;

        documents
            .into_iter()
            .map(|document| bson::from_document(document).map_err(StoreError::from))
            .collect()
    }

    pub async fn find_one(&self, filter: Document) -> Result<Option<T>, StoreError> {
        match self.store.find_one(T::COLLECTION, filter).await? {
            Some(document) => Ok(Some(bson::from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Validates and persists `model`: inserts under a fresh id when it has
    /// none yet, otherwise replaces the stored document with the same id.
    pub async fn save(&self, model: &mut T) -> Result<(), StoreError> {
        model.validate()?;

        let mut document = bson::to_document(model)?;

        match model.id() {
            Some(id) => {
                self.store.replace_one(T::COLLECTION, id, document).await?;
                debug!("Updated {} in {}", id, T::COLLECTION);
            }
            None => {
                let id = ObjectId::new();
                document.insert("_id", id);
                self.store.insert_one(T::COLLECTION, document).await?;
                model.set_id(id);
                debug!("Created {} in {}", id, T::COLLECTION);
            }
        }

        Ok(())
    }
}
