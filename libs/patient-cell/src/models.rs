use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared_database::bson::{oid::ObjectId, DateTime};
use shared_database::model::{require_present, require_text, Model};
use shared_database::StoreError;
use shared_utils::coerce::loose_text;

/// A booking request as entered on the patient form. `selected_doctor` is
/// whatever the form sent, not a reference to a stored user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub selected_doctor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<DateTime>,
    pub start_time: String,
    pub end_time: String,
    pub price: String,
}

impl Model for Patient {
    const COLLECTION: &'static str = "patients";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), StoreError> {
        require_text("Patient", "name", &self.name)?;
        require_text("Patient", "email", &self.email)?;
        require_text("Patient", "phone", &self.phone)?;
        require_text("Patient", "gender", &self.gender)?;
        require_text("Patient", "selectedDoctor", &self.selected_doctor)?;
        require_present("Patient", "selectedDate", &self.selected_date)?;
        require_text("Patient", "startTime", &self.start_time)?;
        require_text("Patient", "endTime", &self.end_time)?;
        require_text("Patient", "price", &self.price)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePatientRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub selected_doctor: Option<String>,
    #[serde(default)]
    pub selected_date: Value,
    #[serde(default, deserialize_with = "loose_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub price: Value,
}
