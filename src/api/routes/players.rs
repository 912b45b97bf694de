use axum::extract::{Path, Query, State};
use axum::Json;
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{parse_region, ApiError};
use crate::calculate::{match_metrics, summarize_matches};
use crate::models::{MatchId, MatchMetrics, PlayerHandle, PlayerSummary, Puuid, Region, Summoner};
use crate::provider::{DataProvider, ProviderError};

/// Matches averaged per player on the overview.
pub const OVERVIEW_MATCH_COUNT: u32 = 10;
pub const MAX_OVERVIEW_PLAYERS: usize = 4;

#[derive(Debug, Serialize)]
pub struct SummonerResponse {
    #[serde(flatten)]
    pub summoner: Summoner,
    pub region: Region,
    pub is_sample_data: bool,
}

pub async fn summoner(
    State(state): State<AppState>,
    Path((region, name)): Path<(String, String)>,
) -> Result<Json<SummonerResponse>, ApiError> {
    let region = parse_region(&region)?;
    let handle = PlayerHandle::parse(&name)?;

    let resolved = state.provider.resolve_player(region, &handle).await?;
    Ok(Json(SummonerResponse {
        summoner: resolved.data,
        region,
        is_sample_data: resolved.is_sample,
    }))
}

#[derive(Debug, Deserialize)]
pub struct MatchListParams {
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub puuid: Puuid,
    pub region: Region,
    pub match_ids: Vec<MatchId>,
    pub is_sample_data: bool,
}

pub async fn matches(
    State(state): State<AppState>,
    Path((region, puuid)): Path<(String, String)>,
    Query(params): Query<MatchListParams>,
) -> Result<Json<MatchListResponse>, ApiError> {
    let region = parse_region(&region)?;
    if puuid.trim().is_empty() {
        return Err(ApiError::BadRequest("puuid is required".to_string()));
    }
    let count = params
        .count
        .unwrap_or(state.config.riot.match_count)
        .clamp(1, 100);
    let puuid = Puuid::new(puuid.trim());

    let ids = state.provider.list_matches(region, &puuid, count).await?;
    Ok(Json(MatchListResponse {
        puuid,
        region,
        match_ids: ids.data,
        is_sample_data: ids.is_sample,
    }))
}

#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    pub players: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerOverview {
    pub player: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summoner: Option<Summoner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PlayerSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<MatchMetrics>,
    pub is_sample_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub region: Region,
    pub players: Vec<PlayerOverview>,
}

/// Split the `players` parameter into 1..=4 non-empty handles.
pub fn parse_player_list(raw: Option<&str>) -> Result<Vec<String>, ApiError> {
    let players: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if players.is_empty() {
        return Err(ApiError::BadRequest(
            "players is required (comma-separated)".to_string(),
        ));
    }
    if players.len() > MAX_OVERVIEW_PLAYERS {
        return Err(ApiError::BadRequest(format!(
            "At most {} players can be compared, got {}",
            MAX_OVERVIEW_PLAYERS,
            players.len()
        )));
    }
    Ok(players)
}

pub async fn overview(
    State(state): State<AppState>,
    Path(region): Path<String>,
    Query(params): Query<OverviewParams>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let region = parse_region(&region)?;
    let players = parse_player_list(params.players.as_deref())?;

    let provider = state.provider.as_ref();
    let overviews = join_all(
        players
            .into_iter()
            .map(|player| player_overview(provider, region, player)),
    )
    .await;

    Ok(Json(OverviewResponse {
        region,
        players: overviews,
    }))
}

async fn player_overview(
    provider: &dyn DataProvider,
    region: Region,
    player: String,
) -> PlayerOverview {
    match collect_player(provider, region, &player).await {
        Ok((summoner, matches, is_sample)) => PlayerOverview {
            player,
            summary: Some(summarize_matches(&matches)),
            summoner: Some(summoner),
            matches,
            is_sample_data: is_sample,
            error: None,
        },
        Err(e) => {
            tracing::warn!("Overview for {} failed: {}", player, e);
            PlayerOverview {
                player,
                summoner: None,
                summary: None,
                matches: Vec::new(),
                is_sample_data: false,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Resolve a player and compute metrics for their recent matches.
///
/// Matches whose record lacks the player are skipped.
pub async fn collect_player(
    provider: &dyn DataProvider,
    region: Region,
    player: &str,
) -> Result<(Summoner, Vec<MatchMetrics>, bool), ProviderError> {
    let handle =
        PlayerHandle::parse(player).map_err(|e| ProviderError::InvalidInput(e.to_string()))?;
    let summoner = provider.resolve_player(region, &handle).await?;
    let ids = provider
        .list_matches(region, &summoner.data.puuid, OVERVIEW_MATCH_COUNT)
        .await?;

    let puuid = &summoner.data.puuid;
    let details = join_all(
        ids.data
            .iter()
            .map(|id| provider.player_match_detail(region, id, puuid)),
    )
    .await;

    let mut is_sample = summoner.is_sample || ids.is_sample;
    let mut metrics = Vec::new();
    for detail in details {
        let detail = detail?;
        is_sample |= detail.is_sample;
        if let Some(participant) = detail.data.participant(&summoner.data.puuid) {
            metrics.push(match_metrics(&detail.data, participant));
        }
    }

    Ok((summoner.data, metrics, is_sample))
}
