use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared_database::bson::oid::ObjectId;
use shared_database::json::to_json_without;
use shared_database::model::{require_text, Model};
use shared_database::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

impl FromStr for Role {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            other => Err(StoreError::Validation(format!(
                "User validation failed: role: `{}` is not a valid enum value for path `role`.",
                other
            ))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Doctor => write!(f, "doctor"),
        }
    }
}

/// An account. `password` holds an Argon2 PHC string, never the raw
/// password, and is left out of every API rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    pub fn to_public_json(&self) -> Result<Value, StoreError> {
        to_json_without(self, &["password"])
    }
}

impl Model for User {
    const COLLECTION: &'static str = "users";
    const UNIQUE_FIELDS: &'static [&'static str] = &["email"];

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), StoreError> {
        require_text("User", "name", &self.name)?;
        require_text("User", "email", &self.email)?;
        require_text("User", "password", &self.password)?;
        require_text("User", "role", &self.role)?;
        self.role.parse::<Role>()?;
        Ok(())
    }
}
