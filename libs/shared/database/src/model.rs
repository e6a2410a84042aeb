use mongodb::bson::oid::ObjectId;
use serde::{de::DeserializeOwned, Serialize};

use crate::store::StoreError;

/// A document type stored in one named collection.
///
/// `validate` runs before every save, the way a schema validator would:
/// required fields, enum constraints. Uniqueness is left to the store
/// through `UNIQUE_FIELDS`.
pub trait Model: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;
    const UNIQUE_FIELDS: &'static [&'static str] = &[];

    fn id(&self) -> Option<ObjectId>;

    fn set_id(&mut self, id: ObjectId);

    fn validate(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Fails like a required schema path: missing and empty strings are both
/// rejected.
pub fn require_text(model: &str, path: &str, value: &str) -> Result<(), StoreError> {
    if value.is_empty() {
        return Err(StoreError::Validation(format!(
            "{} validation failed: Path `{}` is required.",
            model, path
        )));
    }
    Ok(())
}

pub fn require_present<T>(model: &str, path: &str, value: &Option<T>) -> Result<(), StoreError> {
    if value.is_none() {
        return Err(StoreError::Validation(format!(
            "{} validation failed: Path `{}` is required.",
            model, path
        )));
    }
    Ok(())
}
