use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{ErrorEnvelope, ErrorMessage};

/// Stamps the request path and method onto error envelopes.
pub async fn error_envelope(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;
    let Some(ErrorMessage(error)) = response.extensions_mut().remove::<ErrorMessage>() else {
        return response;
    };

    let status = response.status();
    let body = ErrorEnvelope {
        status_code: status.as_u16(),
        error,
        path,
        method,
        timestamp: jiff::Timestamp::now(),
    };
    let mut rebuilt = (status, Json(body)).into_response();
    *rebuilt.extensions_mut() = std::mem::take(response.extensions_mut());
    rebuilt
}
