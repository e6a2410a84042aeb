use tracing::info;

use shared_database::{AppState, Repository, StoreError};

use crate::models::{Contact, ContactRequest};

pub struct ContactService {
    contacts: Repository<Contact>,
}

impl ContactService {
    pub fn new(state: &AppState) -> Self {
        Self {
            contacts: Repository::new(state.store.clone()),
        }
    }

    pub async fn submit(&self, request: ContactRequest) -> Result<Contact, StoreError> {
        let mut contact = Contact::from(request);
        self.contacts.save(&mut contact).await?;
        info!("Stored contact form submission from {}", contact.email);
        Ok(contact)
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, StoreError> {
        self.contacts.find_all().await
    }
}
