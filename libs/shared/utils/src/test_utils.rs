use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::StatusCode, response::Response};
use serde_json::{json, Value};

use shared_config::{AppConfig, StoreBackend};
use shared_database::bson::{oid::ObjectId, Document};
use shared_database::{AppState, DocumentStore, MemoryStore, Repository, StoreError};
use shared_models::auth::User;

use crate::password::hash_password;

pub struct TestConfig {
    pub server_host: String,
    pub server_port: u16,
    pub mongodb_database: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            mongodb_database: "DoctorAppointmentTest".to_string(),
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            server_host: self.server_host.clone(),
            server_port: self.server_port,
            mongodb_uri: String::new(),
            mongodb_database: self.mongodb_database.clone(),
            store_backend: StoreBackend::Memory,
        }
    }
}

/// A fresh in-memory store plus the state handlers receive. The store is
/// returned separately so tests can count documents directly.
pub async fn test_state() -> (Arc<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = state_with_store(store.clone()).await;
    (state, store)
}

pub async fn state_with_store(store: Arc<dyn DocumentStore>) -> Arc<AppState> {
    Repository::<User>::new(store.clone())
        .ensure_indexes()
        .await
        .expect("in-memory index registration cannot fail");

    Arc::new(AppState::new(TestConfig::default().to_app_config(), store))
}

/// Wraps a `MemoryStore` and fails writes to chosen collections, or every
/// read, with a backend error.
pub struct FaultyStore {
    inner: Arc<MemoryStore>,
    failing_writes: HashSet<String>,
    failing_reads: bool,
}

impl FaultyStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            failing_writes: HashSet::new(),
            failing_reads: false,
        }
    }

    pub fn fail_writes_to(mut self, collection: &str) -> Self {
        self.failing_writes.insert(collection.to_string());
        self
    }

    pub fn fail_reads(mut self) -> Self {
        self.failing_reads = true;
        self
    }

    fn check_write(&self, collection: &str) -> Result<(), StoreError> {
        if self.failing_writes.contains(collection) {
            return Err(StoreError::Backend(format!("simulated write failure on {}", collection)));
        }
        Ok(())
    }

    fn check_read(&self, collection: &str) -> Result<(), StoreError> {
        if self.failing_reads {
            return Err(StoreError::Backend(format!("simulated read failure on {}", collection)));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FaultyStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        self.check_read(collection)?;
        self.inner.find(collection, filter).await
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError> {
        self.check_read(collection)?;
        self.inner.find_one(collection, filter).await
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        self.check_write(collection)?;
        self.inner.insert_one(collection, document).await
    }

    async fn replace_one(&self, collection: &str, id: ObjectId, document: Document) -> Result<(), StoreError> {
        self.check_write(collection)?;
        self.inner.replace_one(collection, id, document).await
    }

    async fn ensure_unique_index(&self, collection: &str, field: &str) -> Result<(), StoreError> {
        self.inner.ensure_unique_index(collection, field).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

pub struct TestUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new("Test Patient", "test@example.com", "patient")
    }
}

impl TestUser {
    pub fn new(name: &str, email: &str, role: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: "correct-horse".to_string(),
            role: role.to_string(),
        }
    }

    pub fn doctor(name: &str, email: &str) -> Self {
        Self::new(name, email, "doctor")
    }

    pub fn patient(name: &str, email: &str) -> Self {
        Self::new(name, email, "patient")
    }

    pub fn signup_body(&self) -> Value {
        json!({
            "name": self.name,
            "email": self.email,
            "password": self.password,
            "confirmPassword": self.password,
            "role": self.role,
        })
    }

    /// Stores the user straight through the repository, bypassing signup.
    pub async fn insert(&self, state: &AppState) -> User {
        let mut user = User {
            id: None,
            name: self.name.clone(),
            email: self.email.clone(),
            password: hash_password(&self.password).expect("argon2 hashing"),
            role: self.role.clone(),
        };

        Repository::<User>::new(state.store.clone())
            .save(&mut user)
            .await
            .expect("seed user");

        user
    }
}

pub fn profile_update_body(email: &str) -> Value {
    json!({
        "email": email,
        "name": "Dr. Meredith Grey",
        "bio": "General surgeon",
        "phone": "555-0100",
        "startTime": "09:00",
        "endTime": "17:00",
        "fromDate": "2024-06-01",
        "toDate": "2024-06-30",
        "price": 150,
        "bloodType": "O+",
        "gender": "female",
    })
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON response body")
    };
    (status, value)
}
