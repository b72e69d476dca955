use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;

use std::{convert::Infallible, sync::Arc};

use crate::{
    dto::{ContactForm, ContactResponse},
    service::ContactService,
};

/// Contact fields from either an urlencoded or a multipart body.
///
/// Never rejects: a body that can't be read as a form yields empty fields,
/// which validation then reports as missing.
pub struct ContactFields(pub ContactForm);

impl<S> FromRequest<S> for ContactFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            return match Multipart::from_request(req, state).await {
                Ok(multipart) => Ok(Self(read_multipart(multipart).await)),
                Err(e) => {
                    tracing::warn!("Unreadable multipart contact body: {e}");
                    Ok(Self(ContactForm::default()))
                }
            };
        }

        match Form::<ContactForm>::from_request(req, state).await {
            Ok(Form(form)) => Ok(Self(form)),
            Err(e) => {
                tracing::warn!("Unreadable contact form body: {e}");
                Ok(Self(ContactForm::default()))
            }
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> ContactForm {
    let mut form = ContactForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Stopped reading multipart contact body: {e}");
                break;
            }
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let Ok(value) = field.text().await else {
            continue;
        };

        match name.as_str() {
            "name" => form.name = Some(value),
            "email" => form.email = Some(value),
            "message" => form.message = Some(value),
            _ => {}
        }
    }

    form
}

#[debug_handler]
pub async fn submit_contact(
    State(service): State<Arc<ContactService>>,
    ContactFields(form): ContactFields,
) -> Response {
    match service.relay(form).await {
        Ok(()) => (StatusCode::OK, Json(ContactResponse { ok: true })).into_response(),
        Err(e) => {
            tracing::warn!("Contact submission failed ({}): {}", e.kind(), e.detail());
            e.into_response()
        }
    }
}
