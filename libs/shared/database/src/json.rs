use mongodb::bson::{self, Bson};
use serde_json::Value;

use crate::model::Model;
use crate::store::StoreError;

/// Renders a stored document for API responses: ids as hex strings and
/// dates as RFC 3339.
pub fn to_json<T: Model>(model: &T) -> Result<Value, StoreError> {
    to_json_without(model, &[])
}

pub fn to_json_without<T: Model>(model: &T, hidden: &[&str]) -> Result<Value, StoreError> {
    let mut document = bson::to_document(model)?;
    for field in hidden {
        document.remove(*field);
    }
    Ok(bson_to_json(Bson::Document(document)))
}

pub fn to_json_list<T: Model>(models: &[T]) -> Result<Value, StoreError> {
    models
        .iter()
        .map(to_json)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(date) => match date.try_to_rfc3339_string() {
            Ok(text) => Value::String(text),
            Err(_) => Value::from(date.timestamp_millis()),
        },
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
