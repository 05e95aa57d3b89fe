//! Axum extractors for request handling
//!
//! Custom extractors for the session user, path ids, and form bodies.

mod auth;
mod form;
mod path;

pub use auth::{CurrentUser, MaybeUser};
pub use form::FormData;
pub use path::IdPath;
