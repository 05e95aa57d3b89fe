//! Response types and error handling for page handlers
//!
//! Every failure becomes either a redirect or a rendered error page. Internal
//! details are logged, never shown.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use forum_common::AppError;
use forum_core::DomainError;
use forum_service::ServiceError;
use minijinja::{context, Environment};
use thiserror::Error;
use tracing::error;

/// Standalone page used for every error response
const ERROR_TEMPLATE: &str = include_str!("../../templates/error.html");

/// Message shown when no specific one applies
const GENERIC_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Web error type for consistent error pages
#[derive(Debug, Error)]
pub enum WebError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    /// The caller must be logged in
    #[error("Login required")]
    Unauthenticated,

    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    #[error("Invalid form submission: {0}")]
    InvalidForm(String),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl WebError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(e) => StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Service(e) => StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Domain(e) => {
                if e.is_not_found() {
                    StatusCode::NOT_FOUND
                } else if e.is_authorization() {
                    StatusCode::FORBIDDEN
                } else if e.is_validation() {
                    StatusCode::BAD_REQUEST
                } else if e.is_conflict() {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            Self::Unauthenticated => StatusCode::SEE_OTHER,
            Self::InvalidPath(_) => StatusCode::NOT_FOUND,
            Self::InvalidForm(_) => StatusCode::BAD_REQUEST,
            Self::Session(_) | Self::Template(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_form(msg: impl Into<String>) -> Self {
        Self::InvalidForm(msg.into())
    }

    /// Text safe to show on the error page
    fn into_user_message(self) -> String {
        match self {
            Self::App(e) => e.user_message(),
            Self::Service(e) => e.into_user_message(),
            Self::Domain(e) => AppError::from(e).user_message(),
            Self::InvalidPath(_) => "That page does not exist.".to_string(),
            Self::InvalidForm(_) => "The form was incomplete. Please try again.".to_string(),
            Self::Unauthenticated | Self::Session(_) | Self::Template(_) | Self::Internal(_) => {
                GENERIC_MESSAGE.to_string()
            }
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Unauthenticated) {
            return see_other("/");
        }

        let status = self.status_code();

        // Log server errors
        if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
        }

        let message = self.into_user_message();
        (status, error_page(status, &message)).into_response()
    }
}

/// Render the error page outside the shared template set
///
/// Error responses have no access to application state, so the page is
/// compiled on demand. A broken template degrades to plain text.
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let mut env = Environment::new();
    let rendered = env
        .add_template("error.html", ERROR_TEMPLATE)
        .and_then(|()| env.get_template("error.html"))
        .and_then(|template| {
            template.render(context! {
                status => status.as_u16(),
                reason => status.canonical_reason().unwrap_or("Error"),
                message => message,
            })
        });

    match rendered {
        Ok(html) => Html(html),
        Err(e) => {
            error!(error = %e, "Failed to render error page");
            Html(format!("{} {}", status.as_u16(), GENERIC_MESSAGE))
        }
    }
}

/// 303 See Other to `location`
pub fn see_other(location: &str) -> Response {
    Redirect::to(location).into_response()
}

/// Type alias for handler results
pub type WebResult<T> = Result<T, WebError>;
