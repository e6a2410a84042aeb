use serde::{Deserialize, Serialize};

use shared_database::bson::{oid::ObjectId, DateTime};
use shared_database::model::{require_present, require_text, Model};
use shared_database::StoreError;

/// Snapshot of the patient taken when the appointment was booked. It is
/// copied into the appointment, not linked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentUser {
    pub name: String,
    pub email: String,
    pub gender: String,
    pub photo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user: AppointmentUser,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<f64>,
    #[serde(default = "DateTime::now")]
    pub created_at: DateTime,
}

impl Appointment {
    pub fn new(user: AppointmentUser, ticket_price: f64) -> Self {
        Self {
            id: None,
            user,
            is_paid: false,
            ticket_price: Some(ticket_price),
            created_at: DateTime::now(),
        }
    }
}

impl Model for Appointment {
    const COLLECTION: &'static str = "appointments";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), StoreError> {
        require_text("Appointment", "user.name", &self.user.name)?;
        require_text("Appointment", "user.email", &self.user.email)?;
        require_text("Appointment", "user.gender", &self.user.gender)?;
        require_text("Appointment", "user.photo", &self.user.photo)?;
        require_present("Appointment", "ticketPrice", &self.ticket_price)
    }
}
