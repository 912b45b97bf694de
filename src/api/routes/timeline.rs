use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{parse_region, ApiError};
use crate::models::{GameEvent, MatchId, ParticipantInfo};
use crate::timeline::{bucket_wards_then_objectives, Frame};

/// An owned copy of a [`Frame`] for the response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineFrame {
    pub timestamp: u64,
    pub events: Vec<GameEvent>,
}

impl From<Frame<'_>> for TimelineFrame {
    fn from(frame: Frame<'_>) -> Self {
        Self {
            timestamp: frame.timestamp,
            events: frame.events.into_iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub match_id: MatchId,
    pub map_id: u32,
    /// Milliseconds.
    pub game_duration: u64,
    pub frames: Vec<TimelineFrame>,
    pub ward_events: Vec<GameEvent>,
    pub objective_events: Vec<GameEvent>,
    pub participants: Vec<ParticipantInfo>,
    pub is_sample_data: bool,
}

pub async fn match_timeline(
    State(state): State<AppState>,
    Path((region, match_id)): Path<(String, String)>,
) -> Result<Json<TimelineResponse>, ApiError> {
    let region = parse_region(&region)?;
    if match_id.trim().is_empty() {
        return Err(ApiError::BadRequest("match id is required".to_string()));
    }
    let match_id = MatchId::new(match_id.trim());

    let sourced = state.provider.match_timeline(region, &match_id).await?;
    let timeline = sourced.data;

    let frames = bucket_wards_then_objectives(&timeline.events, timeline.game_duration)
        .into_iter()
        .map(TimelineFrame::from)
        .collect();
    let ward_events = timeline.ward_events().cloned().collect();
    let objective_events = timeline.objective_events().cloned().collect();

    Ok(Json(TimelineResponse {
        match_id: timeline.match_id,
        map_id: timeline.map_id,
        game_duration: timeline.game_duration,
        frames,
        ward_events,
        objective_events,
        participants: timeline.participants,
        is_sample_data: sourced.is_sample,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::routes::test_support::{get_json, sample_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_sample_timeline_frames() {
        let (status, json) = get_json(sample_app(), "/api/match-timeline/kr/KR_7200123456").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["match_id"], "KR_7200123456");
        assert_eq!(json["map_id"], 11);
        assert_eq!(json["game_duration"], 2_100_000);
        assert_eq!(json["is_sample_data"], true);

        let frames = json["frames"].as_array().unwrap();
        assert_eq!(frames.len(), 36);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame["timestamp"], i as u64 * 60_000);
        }

        assert_eq!(frames[0]["events"].as_array().unwrap().len(), 0);
        assert_eq!(frames[1]["events"][0]["type"], "WARD_PLACED");
        assert_eq!(frames[1]["events"][0]["timestamp"], 90_000);
        assert_eq!(frames[5]["events"][0]["type"], "ELITE_MONSTER_KILL");
        assert_eq!(frames[11]["events"][0]["type"], "WARD_KILL");

        assert_eq!(json["ward_events"].as_array().unwrap().len(), 9);
        assert_eq!(json["objective_events"].as_array().unwrap().len(), 3);
        assert_eq!(json["participants"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_every_event_lands_in_its_frame() {
        let (_, json) = get_json(sample_app(), "/api/match-timeline/jp1/JP1_1").await;

        let mut total = 0;
        for frame in json["frames"].as_array().unwrap() {
            let start = frame["timestamp"].as_u64().unwrap();
            for event in frame["events"].as_array().unwrap() {
                let ts = event["timestamp"].as_u64().unwrap();
                assert!(start <= ts && ts < start + 60_000);
                total += 1;
            }
        }
        assert_eq!(total, 12);
    }

    #[tokio::test]
    async fn test_timeline_bad_region() {
        let (status, _) = get_json(sample_app(), "/api/match-timeline/xx/KR_1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
