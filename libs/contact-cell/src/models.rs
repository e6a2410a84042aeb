use serde::{Deserialize, Serialize};

use shared_database::bson::oid::ObjectId;
use shared_database::model::{require_text, Model};
use shared_database::StoreError;
use shared_utils::coerce::loose_text;

/// A contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Model for Contact {
    const COLLECTION: &'static str = "contacts";

    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), StoreError> {
        require_text("Contact", "email", &self.email)?;
        require_text("Contact", "subject", &self.subject)?;
        require_text("Contact", "message", &self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub message: Option<String>,
}

impl From<ContactRequest> for Contact {
    fn from(request: ContactRequest) -> Self {
        Self {
            id: None,
            email: request.email.unwrap_or_default(),
            subject: request.subject.unwrap_or_default(),
            message: request.message.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_missing_subject_fails_validation() {
        let contact = Contact::from(ContactRequest {
            email: Some("a@b.com".to_string()),
            subject: None,
            message: Some("test".to_string()),
        });

        assert_matches!(
            contact.validate(),
            Err(StoreError::Validation(msg)) if msg.contains("subject")
        );
    }

    #[test]
    fn test_complete_submission_is_valid() {
        let contact = Contact::from(ContactRequest {
            email: Some("a@b.com".to_string()),
            subject: Some("Hi".to_string()),
            message: Some("test".to_string()),
        });

        assert!(contact.validate().is_ok());
        assert_eq!(contact.id, None);
    }
}
