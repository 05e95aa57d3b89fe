//! Session plumbing
//!
//! A session carries at most the logged-in user's id and a one-shot flash
//! message. Session rows live in PostgreSQL; the cookie only holds a signed id.

use axum::Router;
use forum_common::AppConfig;
use forum_core::value_objects::UserId;
use time::Duration;
use tower_sessions::{
    cookie::Key, service::SignedCookie, Expiry, Session, SessionManagerLayer, SessionStore,
};
use tower_sessions_sqlx_store::PostgresStore;

use crate::response::WebResult;
use crate::state::AppState;

/// Session key holding the logged-in user's id
pub const USER_ID_KEY: &str = "user_id";

/// Session key holding a message for the next page view
pub const FLASH_KEY: &str = "flash";

/// Attach the session layer to the router
///
/// Cookies are signed with a key derived from the session secret and marked
/// `Secure` in production. Sessions expire after the configured idle time.
pub fn apply_sessions(router: Router<AppState>, store: PostgresStore, config: &AppConfig) -> Router<AppState> {
    router.layer(session_layer(store, config))
}

fn session_layer<S: SessionStore>(store: S, config: &AppConfig) -> SessionManagerLayer<S, SignedCookie> {
    SessionManagerLayer::new(store)
        .with_name(config.session.cookie_name.clone())
        .with_secure(config.app.env.is_production())
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(config.session.idle_minutes)))
        .with_signed(Key::from(config.session.signing_key().as_slice()))
}

/// Log a user in
///
/// The session id is rotated first so a pre-login id can never carry an
/// authenticated identity. A flash left by an earlier failed attempt is dropped.
pub async fn bind_user(session: &Session, user_id: UserId) -> WebResult<()> {
    session.cycle_id().await?;
    session.remove::<String>(FLASH_KEY).await?;
    session.insert(USER_ID_KEY, user_id).await?;
    Ok(())
}

/// The user id stored in the session, if any
pub async fn session_user_id(session: &Session) -> WebResult<Option<UserId>> {
    Ok(session.get::<UserId>(USER_ID_KEY).await?)
}

/// Drop the session and its cookie
pub async fn end_session(session: &Session) -> WebResult<()> {
    session.flush().await?;
    Ok(())
}

pub async fn set_flash(session: &Session, message: impl Into<String>) -> WebResult<()> {
    session.insert(FLASH_KEY, message.into()).await?;
    Ok(())
}

/// Take the pending flash message, clearing it
pub async fn take_flash(session: &Session) -> WebResult<Option<String>> {
    Ok(session.remove::<String>(FLASH_KEY).await?)
}
