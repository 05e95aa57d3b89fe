//! Thread view

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use forum_core::{entities::User, value_objects::TopicId};
use forum_service::{dto::UserView, TopicService};
use minijinja::context;

use crate::extractors::MaybeUser;
use crate::response::{see_other, WebResult};
use crate::state::AppState;

/// Render a thread, optionally with a reply error and the rejected message
///
/// Returns a redirect to `/` when the topic does not exist.
pub(crate) async fn render_thread(
    state: &AppState,
    user: Option<&User>,
    topic_id: TopicId,
    status: StatusCode,
    error: Option<&str>,
    message: Option<&str>,
) -> WebResult<Response> {
    let Some(thread) = TopicService::new(state.service_context())
        .thread(user, topic_id)
        .await?
    else {
        return Ok(see_other("/"));
    };

    let page = state.templates().render(
        "thread.html",
        context! {
            user => user.map(UserView::from),
            thread => thread,
            error => error,
            message => message,
        },
    )?;
    Ok((status, page).into_response())
}

/// A topic and its replies, oldest first
///
/// GET /chat/:id
///
/// Unknown and non-numeric ids redirect to `/`.
pub async fn thread(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(raw_id): Path<String>,
) -> WebResult<Response> {
    let Ok(topic_id) = TopicId::parse(&raw_id) else {
        return Ok(see_other("/"));
    };

    render_thread(&state, user.as_ref(), topic_id, StatusCode::OK, None, None).await
}
