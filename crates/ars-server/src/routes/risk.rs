use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use jiff::civil::Date;
use jiff::Timestamp;
use serde::Deserialize;
use uuid::Uuid;

use ars_core::error::CoreError;
use ars_core::models::risk::RiskRecord;
use ars_core::models::submission::Submission;
use ars_risk::stratify::stratify as score;
use ars_storage::records::DateRange;

use crate::error::ApiError;
use crate::extract::Payload;
use crate::state::AppState;

/// Score a submission for a registered participant and persist the record.
pub async fn stratify(
    State(state): State<AppState>,
    Payload(submission): Payload<Submission>,
) -> Result<Json<RiskRecord>, ApiError> {
    state
        .patients
        .get(submission.patient_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Patient not found!".to_string()))?;

    let today = Timestamp::now()
        .to_zoned(state.settings.snapshot().zone())
        .date();
    let catalog = ars_risk::catalog(submission.platform);
    let result = score(catalog, &submission.response, today)?;

    let record = state
        .records
        .insert(result.into_record(submission.patient_id, submission.platform))
        .await?;

    tracing::info!(
        record_id = %record.id,
        patient_id = %record.patient_id,
        platform = record.platform.as_str(),
        risk_level = record.risk_level.as_str(),
        risk_value = record.risk_value,
        "risk record created"
    );

    Ok(Json(record))
}

pub async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RiskRecord>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(CoreError::from)?;
    let record = state
        .records
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Risk record not found!".to_string()))?;
    Ok(Json(record))
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultsQuery {
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

pub async fn list_results(
    State(state): State<AppState>,
    query: Result<Query<ResultsQuery>, QueryRejection>,
) -> Result<Json<Vec<RiskRecord>>, ApiError> {
    let Query(query) = query?;
    let range = DateRange {
        start: query.start_date,
        end: query.end_date,
    };
    Ok(Json(state.records.list(range).await?))
}
