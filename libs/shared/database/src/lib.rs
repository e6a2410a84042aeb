pub mod json;
pub mod memory;
pub mod model;
pub mod mongo;
pub mod repository;
pub mod state;
pub mod store;

pub use memory::MemoryStore;
pub use model::Model;
pub use mongo::MongoStore;
pub use repository::Repository;
pub use state::AppState;
pub use store::{DocumentStore, StoreError};

// Re-exported so cells build filters and ids against the same bson version.
pub use mongodb::bson;
