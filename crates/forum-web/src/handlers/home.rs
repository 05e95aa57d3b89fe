//! Home page

use axum::{extract::State, response::Html};
use forum_service::{dto::UserView, TopicService};
use minijinja::context;
use tower_sessions::Session;

use crate::extractors::MaybeUser;
use crate::response::WebResult;
use crate::session::take_flash;
use crate::state::AppState;

/// Topic list, newest first, plus the pending flash message
///
/// GET /
pub async fn home(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    session: Session,
) -> WebResult<Html<String>> {
    let topics = TopicService::new(state.service_context())
        .list(user.as_ref())
        .await?;
    let flash = take_flash(&session).await?;

    state.templates().render(
        "home.html",
        context! {
            user => user.as_ref().map(UserView::from),
            topics => topics,
            flash => flash,
        },
    )
}
