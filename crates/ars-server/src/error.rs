use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jiff::Timestamp;
use serde::Serialize;

use ars_core::error::CoreError;
use ars_dialog::error::DialogError;
use ars_risk::error::RiskError;
use ars_storage::error::StorageError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// The submission references questions the catalog does not have.
    Unprocessable(String),
    BadGateway(String),
    GatewayTimeout(String),
    Internal(String),
}

/// Uniform error body. `path` and `method` are filled in by
/// [`crate::middleware::envelope::error_envelope`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status_code: u16,
    pub error: String,
    pub path: String,
    pub method: String,
    pub timestamp: Timestamp,
}

/// Marker left on error responses so the envelope middleware can rewrite
/// them with request details.
#[derive(Debug, Clone)]
pub struct ErrorMessage(pub String);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                "Internal server error".to_string()
            }
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::BadGateway(msg)
            | ApiError::GatewayTimeout(msg) => msg,
        };

        let body = ErrorEnvelope {
            status_code: status.as_u16(),
            error: message.clone(),
            path: String::new(),
            method: String::new(),
            timestamp: Timestamp::now(),
        };
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorMessage(message));
        response
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("not found: {key}")),
            StorageError::Conflict(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Serialization(e) => ApiError::Internal(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<RiskError> for ApiError {
    fn from(e: RiskError) -> Self {
        if e.is_validation() {
            ApiError::BadRequest(e.to_string())
        } else {
            ApiError::Unprocessable(e.to_string())
        }
    }
}

impl From<DialogError> for ApiError {
    fn from(e: DialogError) -> Self {
        match e {
            DialogError::Core(e) => e.into(),
            DialogError::Storage(e) => e.into(),
            DialogError::Risk(e) => e.into(),
            DialogError::UpstreamGateway(msg) => ApiError::BadGateway(msg),
            e @ DialogError::DeliveryTimeout { .. } => ApiError::GatewayTimeout(e.to_string()),
            e @ (DialogError::UnknownSetting(_) | DialogError::ReadOnlySetting(_)) => {
                ApiError::BadRequest(e.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(e: FormRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}
