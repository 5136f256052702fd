use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Conversation a dialog request belongs to, attached to the response by
/// the `/dialog` handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation(pub String);

/// Logs every API request as one structured `api_request` event. Dialog
/// requests also carry their conversation key.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    match response.extensions().get::<Conversation>() {
        Some(Conversation(key)) => tracing::info!(
            method = %method,
            path = %uri,
            status = status,
            conversation = %key,
            "api_request"
        ),
        None => tracing::info!(method = %method, path = %uri, status = status, "api_request"),
    }

    response
}
