use std::sync::Arc;

use tracing::info;

use shared_config::{AppConfig, StoreBackend};

use crate::memory::MemoryStore;
use crate::mongo::MongoStore;
use crate::store::{DocumentStore, StoreError};

/// Shared handler state: the loaded config plus the one store handle
/// opened at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    pub async fn connect(config: AppConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn DocumentStore> = match config.store_backend {
            StoreBackend::MongoDb => Arc::new(MongoStore::connect(&config).await?),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };

        store.ping().await?;
        info!("Document store ready ({})", config.store_backend);

        Ok(Self::new(config, store))
    }
}
