//! Membership upgrade handler

use axum::{extract::State, response::Response};
use forum_service::{dto::UpgradeForm, MembershipService};

use crate::extractors::{CurrentUser, FormData};
use crate::response::{see_other, WebResult};
use crate::state::AppState;

/// Grant membership to the session user
///
/// POST /upgrade
///
/// A wrong passcode renders a 403 page and leaves membership unchanged.
pub async fn upgrade(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    FormData(form): FormData<UpgradeForm>,
) -> WebResult<Response> {
    MembershipService::new(state.service_context())
        .upgrade(&user, &form)
        .await?;
    Ok(see_other("/"))
}
