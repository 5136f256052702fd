//! ars-server
//!
//! HTTP surface of the risk-stratification service: the USSD turn and
//! delivery endpoints, risk scoring and results, participant registration,
//! the questionnaire listing and runtime gateway configuration.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::http::{HeaderValue, Method, Uri};
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use config::ServerConfig;
use error::ApiError;
use state::AppState;

/// Build the router with its middleware stack.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let origin = if config.allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Telephony
        .route("/dialog/turn", post(routes::dialog::turn))
        .route("/dialog/delivery", post(routes::dialog::delivery))
        .route("/dialog/messages/{phone}", get(routes::dialog::messages_by_phone))
        // Scoring
        .route("/risk/stratify", post(routes::risk::stratify))
        .route("/risk/results", get(routes::risk::list_results))
        .route("/risk/results/{id}", get(routes::risk::get_result))
        .route("/questions", get(routes::questions::list_questions))
        // Participants
        .route("/patients", post(routes::patients::register_patient))
        .route("/patients/{id}", get(routes::patients::get_patient))
        // Runtime gateway settings
        .route("/config", get(routes::config::get_config))
        .route("/config/{key}", get(routes::config::get_config_value))
        .route("/config/{key}/{value}", post(routes::config::set_config_value))
        .fallback(not_found)
        .layer(axum_mw::from_fn(middleware::envelope::error_envelope))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Cannot {method} {}", uri.path()))
}
