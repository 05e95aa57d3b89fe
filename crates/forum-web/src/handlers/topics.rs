//! Topic handlers
//!
//! Creating and deleting topics. Reading one lives in `threads`.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use forum_core::{entities::User, value_objects::TopicId};
use forum_service::{
    dto::{CreateTopicForm, UserView},
    TopicService,
};
use minijinja::context;

use super::form_error_status;
use crate::extractors::{CurrentUser, FormData, IdPath};
use crate::response::{see_other, WebResult};
use crate::state::AppState;

fn render_create_topic(
    state: &AppState,
    user: &User,
    form: &CreateTopicForm,
    error: Option<&str>,
) -> WebResult<Html<String>> {
    state.templates().render(
        "create_topic.html",
        context! {
            user => UserView::from(user),
            form => form,
            error => error,
        },
    )
}

/// New topic form
///
/// GET /topics/create
pub async fn create_topic_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> WebResult<Html<String>> {
    render_create_topic(&state, &user, &CreateTopicForm::default(), None)
}

/// Create a topic
///
/// POST /topics/create
pub async fn create_topic(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    FormData(form): FormData<CreateTopicForm>,
) -> WebResult<Response> {
    match TopicService::new(state.service_context()).create(&user, &form).await {
        Ok(_) => Ok(see_other("/")),
        Err(e) if e.is_recoverable() => {
            let status = form_error_status(&e);
            let page = render_create_topic(&state, &user, &form, Some(&e.into_user_message()))?;
            Ok((status, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a topic and every post under it
///
/// POST /topic/delete/:id
pub async fn delete_topic(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(topic_id): IdPath<TopicId>,
) -> WebResult<Response> {
    TopicService::new(state.service_context())
        .delete(&user, topic_id)
        .await?;
    Ok(see_other("/"))
}
