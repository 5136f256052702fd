use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use jiff::Timestamp;
use serde::Deserialize;
use uuid::Uuid;

use ars_core::error::CoreError;
use ars_core::models::patient::Patient;
use ars_core::phone;

use crate::error::ApiError;
use crate::extract::Payload;
use crate::state::AppState;

const CODE_ATTEMPTS: usize = 16;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub state: String,
    pub lga: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone_number: String,
}

pub async fn register_patient(
    State(state): State<AppState>,
    Payload(body): Payload<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    for (field, value) in [
        ("firstName", &body.first_name),
        ("lastName", &body.last_name),
        ("state", &body.state),
        ("lga", &body.lga),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!("{field} is required")));
        }
    }

    let phone_number = phone::normalize(&body.phone_number)?;
    if state.patients.by_phone(&phone_number).await?.is_some() {
        return Err(ApiError::BadRequest(
            "a patient with this phone number already exists".to_string(),
        ));
    }

    let code = unused_code(&state).await?;
    let patient = Patient {
        id: Uuid::new_v4(),
        code,
        first_name: body.first_name.trim().to_string(),
        last_name: body.last_name.trim().to_string(),
        email: body
            .email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty()),
        state: body.state.trim().to_string(),
        lga: body.lga.trim().to_string(),
        phone_number,
        created_at: Timestamp::now(),
    };

    let patient = state.patients.insert(patient).await?;
    tracing::info!(patient_id = %patient.id, "patient registered");
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(CoreError::from)?;
    let patient = state
        .patients
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Patient not found!".to_string()))?;
    Ok(Json(patient))
}

/// A seven-digit code no other participant holds.
async fn unused_code(state: &AppState) -> Result<String, ApiError> {
    for _ in 0..CODE_ATTEMPTS {
        let code = registration_code();
        if state.patients.by_code(&code).await?.is_none() {
            return Ok(code);
        }
    }
    Err(ApiError::Internal(format!(
        "no free registration code after {CODE_ATTEMPTS} attempts"
    )))
}

fn registration_code() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    let n = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    (1_000_000 + n % 9_000_000).to_string()
}
