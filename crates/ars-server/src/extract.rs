use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};

use crate::error::ApiError;

/// Request body accepted as JSON or as a URL-encoded form, chosen by
/// `Content-Type`. Gateways post forms; other clients post JSON.
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        }
    }
}
