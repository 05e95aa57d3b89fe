//! Session user extractors
//!
//! Resolve the logged-in user from the session on every request that needs
//! identity.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use forum_core::entities::User;
use forum_service::AuthService;
use tower_sessions::Session;

use crate::response::WebError;
use crate::session::{end_session, session_user_id};
use crate::state::AppState;

/// The logged-in user, if any
///
/// A session naming a user that no longer exists is flushed and the request
/// proceeds as anonymous.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| WebError::internal(anyhow::anyhow!(msg)))?;

        let Some(user_id) = session_user_id(&session).await? else {
            return Ok(MaybeUser(None));
        };

        let app_state = AppState::from_ref(state);
        let user = AuthService::new(app_state.service_context())
            .current_user(user_id)
            .await?;

        if user.is_none() {
            tracing::warn!(user_id = %user_id, "Session names a missing user; logging out");
            end_session(&session).await?;
        }

        Ok(MaybeUser(user))
    }
}

/// The logged-in user; anonymous callers are redirected to `/`
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match MaybeUser::from_request_parts(parts, state).await? {
            MaybeUser(Some(user)) => Ok(CurrentUser(user)),
            MaybeUser(None) => Err(WebError::Unauthenticated),
        }
    }
}
