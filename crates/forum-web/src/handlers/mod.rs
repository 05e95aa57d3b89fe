//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod home;
pub mod membership;
pub mod posts;
pub mod threads;
pub mod topics;

use axum::http::StatusCode;
use forum_service::ServiceError;

/// Status for a form re-rendered after a recoverable error
fn form_error_status(err: &ServiceError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
}
