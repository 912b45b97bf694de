use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{parse_region, ApiError};
use crate::calculate::match_metrics as compute_match_metrics;
use crate::models::{MatchId, MatchMetrics, Puuid};

#[derive(Debug, Deserialize)]
pub struct MetricsParams {
    pub puuid: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub match_metrics: MatchMetrics,
    pub is_sample_data: bool,
}

pub async fn match_metrics(
    State(state): State<AppState>,
    Path((region, match_id)): Path<(String, String)>,
    Query(params): Query<MetricsParams>,
) -> Result<Json<MetricsResponse>, ApiError> {
    let region = parse_region(&region)?;
    let puuid = params
        .puuid
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(Puuid::new)
        .ok_or_else(|| ApiError::BadRequest("puuid query parameter is required".to_string()))?;
    let match_id = MatchId::new(match_id);

    let detail = state
        .provider
        .player_match_detail(region, &match_id, &puuid)
        .await?;
    let participant = detail.data.participant(&puuid).ok_or_else(|| {
        ApiError::not_found(format!("Player {} did not take part in {}", puuid, match_id))
    })?;

    Ok(Json(MetricsResponse {
        match_metrics: compute_match_metrics(&detail.data, participant),
        is_sample_data: detail.is_sample,
    }))
}
