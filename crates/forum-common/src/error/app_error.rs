//! Application error types
//!
//! Unified error handling for the entire application.

use forum_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Incorrect username or password")]
    InvalidCredentials,

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 401 Unauthorized
            Self::InvalidCredentials => 401,

            // 500 Internal Server Error
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_authorization() {
                    403
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
        }
    }

    /// Message that is safe to show on a rendered page
    ///
    /// Server errors collapse to a generic message; their detail belongs in logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_server_error() {
            return "Something went wrong. Please try again later.".to_string();
        }
        match self {
            Self::Domain(DomainError::UpgradeDenied) => {
                "Access denied: that passcode is not valid.".to_string()
            }
            Self::Domain(e) if e.is_not_found() => "That page does not exist.".to_string(),
            other => other.to_string(),
        }
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        let status = self.status_code();
        (500..600).contains(&status)
    }
}
