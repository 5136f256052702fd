use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use ars_core::models::risk::Platform;
use ars_risk::catalog::GroupView;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub platform: Option<Platform>,
}

/// Active questionnaire for a platform, web by default.
pub async fn list_questions(
    query: Result<Query<QuestionQuery>, QueryRejection>,
) -> Result<Json<Vec<GroupView>>, ApiError> {
    let Query(query) = query?;
    let platform = query.platform.unwrap_or(Platform::Web);
    Ok(Json(ars_risk::catalog(platform).active_view()))
}
