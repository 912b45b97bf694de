use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{parse_region, ApiError};
use crate::map::{map_config, KeyArea, MapInfo, KEY_AREAS, MAP_CONFIGS, SUMMONERS_RIFT};
use crate::models::{MatchId, Puuid, TeamId, WardCategory};
use crate::parse_game_time;
use crate::timeline::{
    active_wards_at, place_on_map, summarize, PlacedWard, VisionSummary, WardFilter,
};

#[derive(Debug, Default, Deserialize)]
pub struct VisionParams {
    /// Game time: `mm:ss`, `90s`, `12m` or milliseconds. Defaults to game end.
    pub t: Option<String>,
    /// `100`, `200`, `blue` or `red`.
    pub team: Option<String>,
    /// Comma-separated ward categories.
    pub category: Option<String>,
    /// Adds this player's vision score to the summary.
    pub puuid: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VisionResponse {
    pub match_id: MatchId,
    pub timestamp: u64,
    pub game_duration: u64,
    pub map: MapInfo,
    pub wards: Vec<PlacedWard>,
    pub summary: VisionSummary,
    pub is_sample_data: bool,
}

pub fn parse_team(raw: &str) -> Result<TeamId, ApiError> {
    match raw.trim().to_lowercase().as_str() {
        "100" | "blue" => Ok(TeamId::Blue),
        "200" | "red" => Ok(TeamId::Red),
        other => Err(ApiError::BadRequest(format!("Unknown team: {}", other))),
    }
}

pub fn parse_categories(raw: &str) -> Result<Vec<WardCategory>, ApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| {
            WardCategory::parse(c)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown ward category: {}", c)))
        })
        .collect()
}

impl VisionParams {
    fn filter(&self) -> Result<WardFilter, ApiError> {
        let team = self.team.as_deref().map(parse_team).transpose()?;
        let categories = self
            .category
            .as_deref()
            .map(parse_categories)
            .transpose()?
            .filter(|cats| !cats.is_empty());
        Ok(WardFilter { team, categories })
    }

    /// Requested time, clamped to the game's length.
    fn time(&self, game_duration: u64) -> Result<u64, ApiError> {
        match self.t.as_deref() {
            None => Ok(game_duration),
            Some(raw) => parse_game_time(raw)
                .map(|t| t.min(game_duration))
                .ok_or_else(|| ApiError::BadRequest(format!("Invalid game time: {}", raw))),
        }
    }
}

/// Wards on the map at one moment of a match, positioned for the overlay.
pub async fn vision_state(
    State(state): State<AppState>,
    Path((region, match_id)): Path<(String, String)>,
    Query(params): Query<VisionParams>,
) -> Result<Json<VisionResponse>, ApiError> {
    let region = parse_region(&region)?;
    let filter = params.filter()?;
    let match_id = MatchId::new(match_id.trim());

    let sourced = state.provider.match_timeline(region, &match_id).await?;
    let timeline = sourced.data;
    let t = params.time(timeline.game_duration)?;

    let config = match map_config(timeline.map_id) {
        Some(config) => config,
        None => {
            tracing::warn!(
                "No bounds for map {}, drawing {} on Summoner's Rift",
                timeline.map_id,
                timeline.match_id
            );
            &MAP_CONFIGS[0]
        }
    };
    let key_areas: &[KeyArea] = if config.map_id == SUMMONERS_RIFT {
        &KEY_AREAS
    } else {
        &[]
    };

    let wards = place_on_map(
        filter.apply(active_wards_at(&timeline.events, t)),
        &config.bounds,
    );
    let mut summary = summarize(&wards, key_areas);
    if let Some(puuid) = params.puuid.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        let puuid = Puuid::new(puuid);
        let detail = state
            .provider
            .player_match_detail(region, &match_id, &puuid)
            .await?;
        summary.vision_score = detail.data.participant(&puuid).map(|p| p.vision_score);
    }
    let version = state.ddragon_version().await;

    Ok(Json(VisionResponse {
        match_id: timeline.match_id,
        timestamp: t,
        game_duration: timeline.game_duration,
        map: MapInfo::new(config, &version),
        wards,
        summary,
        is_sample_data: sourced.is_sample,
    }))
}
