pub mod server;
pub mod tracing;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },

    #[error("Invalid value for '{key}': {details}")]
    InvalidValue { key: String, details: String },
}

/// Application environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Static build information about the running binary.
///
/// Use the [`app_info!`] macro to capture the calling crate's name and version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Builds an [`AppInfo`] from the invoking crate's Cargo metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// What [`load_dotenv`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvOutcome {
    Loaded(PathBuf),
    NotFound,
    Unreadable(String),
}

impl DotenvOutcome {
    /// Report the outcome. Call once tracing is initialized.
    pub fn log(&self) {
        match self {
            DotenvOutcome::Loaded(path) => {
                ::tracing::debug!("Loaded environment from {}", path.display())
            }
            DotenvOutcome::NotFound => {}
            DotenvOutcome::Unreadable(e) => ::tracing::warn!("Ignoring unreadable .env file: {}", e),
        }
    }
}

impl From<dotenvy::Result<PathBuf>> for DotenvOutcome {
    fn from(result: dotenvy::Result<PathBuf>) -> Self {
        match result {
            Ok(path) => DotenvOutcome::Loaded(path),
            Err(e) if e.not_found() => DotenvOutcome::NotFound,
            Err(e) => DotenvOutcome::Unreadable(e.to_string()),
        }
    }
}

/// Load a `.env` file from the working directory (or its parents) if one exists.
///
/// Variables already present in the process environment win. Runs before
/// tracing is set up, so the result is returned for [`DotenvOutcome::log`].
pub fn load_dotenv() -> DotenvOutcome {
    dotenvy::dotenv().into()
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parse an environment variable into `T`, falling back to `default` when unset.
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
