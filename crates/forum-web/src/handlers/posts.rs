//! Post handlers

use axum::{extract::State, response::Response};
use forum_core::value_objects::PostId;
use forum_service::{
    dto::{CreatePostForm, DeletePostForm},
    PostService,
};

use super::form_error_status;
use super::threads::render_thread;
use crate::extractors::{CurrentUser, FormData, IdPath};
use crate::response::{see_other, WebResult};
use crate::state::AppState;

/// Reply to a topic
///
/// POST /post/create
///
/// An empty or oversized message re-renders the thread with the error.
pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    FormData(form): FormData<CreatePostForm>,
) -> WebResult<Response> {
    match PostService::new(state.service_context()).create(&user, &form).await {
        Ok(post) => Ok(see_other(&format!("/chat/{}", post.topic_id))),
        Err(e) if e.is_recoverable() => {
            let status = form_error_status(&e);
            render_thread(
                &state,
                Some(&user),
                form.topic_id,
                status,
                Some(&e.into_user_message()),
                Some(&form.message),
            )
            .await
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete one post
///
/// POST /post/delete/:id
///
/// Redirects to the thread the post belonged to. If the post is already
/// gone, the form's topic id picks the target, falling back to `/`.
pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(post_id): IdPath<PostId>,
    FormData(form): FormData<DeletePostForm>,
) -> WebResult<Response> {
    let deleted_from = PostService::new(state.service_context())
        .delete(&user, post_id)
        .await?;

    let location = match deleted_from.or_else(|| form.topic_id()) {
        Some(topic_id) => format!("/chat/{topic_id}"),
        None => "/".to_string(),
    };
    Ok(see_other(&location))
}
