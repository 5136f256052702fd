use axum::extract::{Path, State};
use axum::Json;

use ars_core::cache_keys::CONFIG;
use ars_dialog::settings::{GatewaySettings, SettingKey};
use ars_storage::state::{load_state, save_state};

use crate::error::ApiError;
use crate::state::AppState;

/// The last persisted settings snapshot, or the live settings if none was
/// ever written.
pub async fn get_config(State(state): State<AppState>) -> Result<Json<GatewaySettings>, ApiError> {
    let stored: Option<GatewaySettings> = load_state(&*state.store, CONFIG).await?;
    Ok(Json(stored.unwrap_or_else(|| state.settings.snapshot())))
}

pub async fn get_config_value(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<String>, ApiError> {
    let key: SettingKey = key.parse()?;
    Ok(Json(state.settings.snapshot().get(key).to_string()))
}

pub async fn set_config_value(
    State(state): State<AppState>,
    Path((key, value)): Path<(String, String)>,
) -> Result<Json<GatewaySettings>, ApiError> {
    let key: SettingKey = key.parse()?;
    let snapshot = state.settings.update(key, &value)?;
    save_state(&*state.store, CONFIG, &snapshot).await?;
    Ok(Json(snapshot))
}
