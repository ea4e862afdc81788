use crate::Contact;
use crate::error::ContactError;
use crate::submission::{ContactForm, RelayResponse};
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Form, FromRequest, Request, State};
use axum::http::header;
use folio_derive::api_handler;
use folio_kernel::domain::constants::CONTACT_TAG;
use folio_kernel::server::ApiState;
use std::convert::Infallible;
use tracing::error;

/// Form body from either JSON or URL-encoded input.
///
/// Anything that cannot be decoded yields an empty form, which validation
/// then reports as missing fields.
#[derive(Debug)]
pub(crate) struct Submitted(pub(crate) ContactForm);

impl<S> FromRequest<S> for Submitted
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let url_encoded = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let form = if url_encoded {
            Form::<ContactForm>::from_request(req, state).await.ok().map(|Form(form)| form)
        } else {
            Bytes::from_request(req, state)
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<ContactForm>(&body).ok())
        };

        Ok(Self(form.unwrap_or_default()))
    }
}

#[api_handler(
    post,
    path = "/contact",
    request_body(content = ContactForm, description = "Contact form, JSON or URL-encoded"),
    responses(
        (status = OK, description = "Message relayed", body = RelayResponse),
        (status = BAD_REQUEST, description = "Missing field or invalid email", body = RelayResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Delivery failed", body = RelayResponse),
    ),
    tag = CONTACT_TAG,
)]
pub(crate) async fn submit_handler(
    State(state): State<ApiState>,
    Submitted(form): Submitted,
) -> Result<Json<RelayResponse>, ContactError> {
    let contact = state.try_get_slice::<Contact>().map_err(|e| {
        error!(error = %e, "Contact slice not registered");
        ContactError::from(e.to_string())
    })?;
    contact.relay(form).await?;

    Ok(Json(RelayResponse::accepted()))
}
