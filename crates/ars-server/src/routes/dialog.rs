use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use ars_core::phone;
use ars_dialog::controller::{DeliveryRequest, TurnRequest};

use crate::error::ApiError;
use crate::extract::Payload;
use crate::middleware::audit::Conversation;
use crate::state::AppState;

/// Attach the conversation key of `raw_phone` to the response, success or
/// error. Unparseable phones are left untagged.
fn tagged<T: IntoResponse>(raw_phone: &str, result: Result<T, ApiError>) -> Response {
    let mut response = result.into_response();
    if let Ok(e164) = phone::normalize(raw_phone) {
        response
            .extensions_mut()
            .insert(Conversation(phone::conversation_key(&e164)));
    }
    response
}

/// One USSD turn. The reply is plain text starting with `CON` or `END`.
pub async fn turn(
    State(state): State<AppState>,
    Payload(request): Payload<TurnRequest>,
) -> Response {
    let raw_phone = request.phone_number.clone();
    let result = state.dialog.handle_turn(request).await.map_err(ApiError::from);
    tagged(&raw_phone, result)
}

/// Flow message callback from RapidPro.
pub async fn delivery(
    State(state): State<AppState>,
    Payload(request): Payload<DeliveryRequest>,
) -> Response {
    let raw_phone = request.to.clone();
    let result = state
        .dialog
        .handle_delivery(request)
        .await
        .map_err(ApiError::from);
    tagged(&raw_phone, result)
}

pub async fn messages_by_phone(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let phone = phone::normalize(&raw)?;
    let messages = state.messages.by_phone(&phone).await?;
    Ok((
        Extension(Conversation(phone::conversation_key(&phone))),
        Json(messages),
    ))
}
