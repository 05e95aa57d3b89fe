//! Authentication handlers
//!
//! Registration, login, and logout.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use forum_common::AppError;
use forum_core::entities::User;
use forum_service::{
    dto::{LogInForm, SignUpForm, UserView},
    AuthService, ServiceError,
};
use minijinja::context;
use tower_sessions::Session;

use super::form_error_status;
use crate::extractors::{FormData, MaybeUser};
use crate::response::{see_other, WebResult};
use crate::session::{bind_user, end_session, set_flash};
use crate::state::AppState;

fn render_sign_up(
    state: &AppState,
    user: Option<&User>,
    form: &SignUpForm,
    error: Option<&str>,
) -> WebResult<Html<String>> {
    state.templates().render(
        "sign_up.html",
        context! {
            user => user.map(UserView::from),
            form => form,
            error => error,
        },
    )
}

/// Registration form
///
/// GET /sign-up
pub async fn sign_up_page(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> WebResult<Html<String>> {
    render_sign_up(&state, user.as_ref(), &SignUpForm::default(), None)
}

/// Register a new user
///
/// POST /sign-up
///
/// Bad input and taken usernames re-render the form with everything but the
/// passwords echoed back. Registration does not log the user in.
pub async fn sign_up(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    FormData(form): FormData<SignUpForm>,
) -> WebResult<Response> {
    match AuthService::new(state.service_context()).register(&form).await {
        Ok(_) => Ok(see_other("/")),
        Err(e) if e.is_recoverable() => {
            let status = form_error_status(&e);
            let page = render_sign_up(
                &state,
                user.as_ref(),
                &form.normalized(),
                Some(&e.into_user_message()),
            )?;
            Ok((status, page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Log in
///
/// POST /log-in
///
/// Success and failure both land on `/`; failure leaves a flash message that
/// does not say which part was wrong.
pub async fn log_in(
    State(state): State<AppState>,
    session: Session,
    FormData(form): FormData<LogInForm>,
) -> WebResult<Response> {
    match AuthService::new(state.service_context()).authenticate(&form).await {
        Ok(user) => bind_user(&session, user.id).await?,
        Err(ServiceError::App(AppError::InvalidCredentials)) => {
            set_flash(&session, AppError::InvalidCredentials.to_string()).await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(see_other("/"))
}

/// Log out
///
/// GET /log-out
pub async fn log_out(session: Session) -> WebResult<Response> {
    end_session(&session).await?;
    Ok(see_other("/"))
}
