use std::env;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_MONGODB_URI: &str = "mongodb://127.0.0.1:27017";
pub const DEFAULT_MONGODB_DATABASE: &str = "DoctorAppointment";

/// Which document store the API talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                key: "DATABASE_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::MongoDb => write!(f, "mongodb"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub store_backend: StoreBackend,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            mongodb_database: DEFAULT_MONGODB_DATABASE.to_string(),
            store_backend: StoreBackend::MongoDb,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be
    /// exercised without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| {
            warn!("SERVER_HOST not set, using {}", DEFAULT_SERVER_HOST);
            DEFAULT_SERVER_HOST.to_string()
        });

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "SERVER_PORT",
                value: raw.clone(),
            })?,
            None => {
                warn!("SERVER_PORT not set, using {}", DEFAULT_SERVER_PORT);
                DEFAULT_SERVER_PORT
            }
        };

        let mongodb_uri = lookup("MONGODB_URI").unwrap_or_else(|| {
            warn!("MONGODB_URI not set, using local default");
            DEFAULT_MONGODB_URI.to_string()
        });

        let mongodb_database = lookup("MONGODB_DATABASE").unwrap_or_else(|| {
            warn!("MONGODB_DATABASE not set, using {}", DEFAULT_MONGODB_DATABASE);
            DEFAULT_MONGODB_DATABASE.to_string()
        });

        let store_backend = match lookup("DATABASE_BACKEND") {
            Some(raw) => raw.parse::<StoreBackend>()?,
            None => StoreBackend::MongoDb,
        };

        let config = Self {
            server_host,
            server_port,
            mongodb_uri,
            mongodb_database,
            store_backend,
        };

        if !config.is_configured() {
            warn!("Application not fully configured - database settings are empty");
        }

        Ok(config)
    }

    pub fn is_configured(&self) -> bool {
        match self.store_backend {
            StoreBackend::Memory => true,
            StoreBackend::MongoDb => {
                !self.mongodb_uri.is_empty() && !self.mongodb_database.is_empty()
            }
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
