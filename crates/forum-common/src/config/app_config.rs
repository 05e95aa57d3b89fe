//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::auth::SharedSecret;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub membership: MembershipConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(format!("unknown environment `{other}`")),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Session cookie configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: SharedSecret,
    pub idle_minutes: i64,
    pub cookie_name: String,
}

impl SessionConfig {
    /// 64-byte cookie signing key derived from the configured secret
    #[must_use]
    pub fn signing_key(&self) -> [u8; 64] {
        self.secret.derive_key()
    }
}

/// Membership upgrade configuration
#[derive(Debug, Clone)]
pub struct MembershipConfig {
    pub upgrade_secret: SharedSecret,
}

// Default value functions
fn default_app_name() -> String {
    "forum".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_idle_minutes() -> i64 {
    1440 // 24 hours
}

/// Longest idle timeout accepted for sessions
const MAX_IDLE_MINUTES: i64 = 60 * 24 * 365;

fn default_cookie_name() -> String {
    "forum.sid".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required keys are missing or invalid
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = Source(lookup);

        let session_secret = source.required("SESSION_SECRET")?;
        if session_secret.is_empty() {
            return Err(ConfigError::InvalidValue(
                "SESSION_SECRET",
                "must not be empty".to_string(),
            ));
        }
        let upgrade_secret = source.required("UPGRADE_SECRET")?;
        if upgrade_secret.is_empty() {
            return Err(ConfigError::InvalidValue(
                "UPGRADE_SECRET",
                "must not be empty".to_string(),
            ));
        }

        let idle_minutes = source.parsed("SESSION_IDLE_MINUTES", default_idle_minutes)?;
        if idle_minutes <= 0 {
            return Err(ConfigError::InvalidValue(
                "SESSION_IDLE_MINUTES",
                "must be positive".to_string(),
            ));
        }
        if idle_minutes > MAX_IDLE_MINUTES {
            return Err(ConfigError::InvalidValue(
                "SESSION_IDLE_MINUTES",
                format!("must be at most {MAX_IDLE_MINUTES} (one year)"),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: source.get("APP_NAME").unwrap_or_else(default_app_name),
                env: source.parsed("APP_ENV", Environment::default)?,
            },
            server: ServerConfig {
                host: source.get("HOST").unwrap_or_else(default_host),
                port: source.parsed("PORT", default_port)?,
            },
            database: DatabaseConfig {
                url: source.required("DATABASE_URL")?,
                max_connections: source.parsed("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: source.parsed("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                acquire_timeout_secs: source
                    .parsed("DATABASE_ACQUIRE_TIMEOUT_SECS", default_acquire_timeout_secs)?,
            },
            session: SessionConfig {
                secret: SharedSecret::new(session_secret),
                idle_minutes,
                cookie_name: source.get("SESSION_COOKIE_NAME").unwrap_or_else(default_cookie_name),
            },
            membership: MembershipConfig {
                upgrade_secret: SharedSecret::new(upgrade_secret),
            },
        })
    }
}

struct Source<F>(F);

impl<F> Source<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parsed<T, D>(&self, key: &'static str, default: D) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
        D: FnOnce() -> T,
    {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidValue(key, e.to_string())),
            None => Ok(default()),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
