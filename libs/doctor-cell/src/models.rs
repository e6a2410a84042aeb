use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use shared_database::bson::{oid::ObjectId, DateTime};
use shared_database::model::{require_present, require_text, Model};
use shared_database::StoreError;
use shared_models::auth::User;
use shared_utils::coerce::loose_text;

// ==============================================================================
// STORED DOCUMENTS
// ==============================================================================

/// Extra details for a user; linked to their availability and pricing by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing_id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub created_at: DateTime,
}

impl UserProfile {
    pub fn new(user_id: ObjectId) -> Self {
        Self {
            id: None,
            user_id,
            bio: None,
            phone: None,
            availability_id: None,
            pricing_id: None,
            blood_type: None,
            gender: None,
            created_at: DateTime::now(),
        }
    }
}

impl Model for UserProfile {
    const COLLECTION: &'static str = "userprofiles";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }
}

/// Consulting window of a doctor. The two dates are not checked against
/// each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<DateTime>,
}

impl Model for Availability {
    const COLLECTION: &'static str = "availabilities";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), StoreError> {
        require_text("Availability", "startTime", &self.start_time)?;
        require_text("Availability", "endTime", &self.end_time)?;
        require_present("Availability", "fromDate", &self.from_date)?;
        require_present("Availability", "toDate", &self.to_date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Model for Pricing {
    const COLLECTION: &'static str = "pricings";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), StoreError> {
        require_present("Pricing", "price", &self.price)
    }
}

/// Contact and schedule card keyed by email. Dates stay as entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub phone: String,
    pub start_time: String,
    pub end_time: String,
    pub start_date: String,
    pub end_date: String,
}

impl Model for Profile {
    const COLLECTION: &'static str = "profiles";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), StoreError> {
        require_text("Profile", "email", &self.email)?;
        require_text("Profile", "phone", &self.phone)?;
        require_text("Profile", "startTime", &self.start_time)?;
        require_text("Profile", "endTime", &self.end_time)?;
        require_text("Profile", "startDate", &self.start_date)?;
        require_text("Profile", "endDate", &self.end_date)
    }
}

// ==============================================================================
// REQUESTS AND RESULTS
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub price: Value,
    #[serde(default, deserialize_with = "loose_text")]
    pub blood_type: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub gender: Option<String>,
    #[serde(default)]
    pub from_date: Value,
    #[serde(default)]
    pub to_date: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub end_date: Option<String>,
}

/// Every document touched by one profile update, as saved.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub user: User,
    pub user_profile: UserProfile,
    pub availability: Availability,
    pub pricing: Pricing,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("User not found")]
    UserNotFound,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
