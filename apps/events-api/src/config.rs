use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_events::mongodb::DEFAULT_COLLECTION;
use std::str::FromStr;

pub use core_config::Environment;

/// Where events are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    MongoDb,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected 'mongodb' or 'memory', got '{}'", other)),
        }
    }
}

/// `EVENTS_STORE` (default `mongodb`) and `EVENTS_COLLECTION` (default `Events`).
#[derive(Clone, Debug)]
pub struct EventsConfig {
    pub store: StoreKind,
    pub collection: String,
}

impl FromEnv for EventsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let store = env_or_default("EVENTS_STORE", "mongodb")
            .parse()
            .map_err(|details| ConfigError::InvalidValue {
                key: "EVENTS_STORE".to_string(),
                details,
            })?;

        Ok(Self {
            store,
            collection: env_or_default("EVENTS_COLLECTION", DEFAULT_COLLECTION),
        })
    }
}

/// Application configuration, composed from the shared config sections.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub events: EventsConfig,
    /// Present when `events.store` is MongoDB
    pub mongodb: Option<MongoConfig>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let events = EventsConfig::from_env()?;

        let mongodb = match events.store {
            StoreKind::MongoDb => {
                Some(MongoConfig::from_env()?.with_app_name(env!("CARGO_PKG_NAME")))
            }
            StoreKind::Memory => None,
        };

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            events,
            mongodb,
        })
    }
}
