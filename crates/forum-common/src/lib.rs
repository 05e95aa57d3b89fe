//! # forum-common
//!
//! Shared utilities including configuration, error handling, password hashing, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{PasswordService, SharedSecret};
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, MembershipConfig,
    ServerConfig, SessionConfig,
};
pub use error::AppError;
pub use telemetry::{init_tracing, TracingConfig, TracingError};
