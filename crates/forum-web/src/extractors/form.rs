//! Form body extractor
//!
//! Wraps axum's `Form` so malformed submissions render the error page instead
//! of a plain-text rejection. Field validation happens in the services.

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;

use crate::response::WebError;

/// URL-encoded form body
#[derive(Debug, Clone)]
pub struct FormData<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormData<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| match e {
            FormRejection::FailedToDeserializeForm(e) => WebError::invalid_form(e.body_text()),
            FormRejection::FailedToDeserializeFormBody(e) => WebError::invalid_form(e.body_text()),
            FormRejection::InvalidFormContentType(e) => WebError::invalid_form(e.body_text()),
            FormRejection::BytesRejection(e) => WebError::invalid_form(e.body_text()),
            _ => WebError::invalid_form("Unreadable form body"),
        })?;

        Ok(FormData(value))
    }
}
