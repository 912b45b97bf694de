use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::map::{map_config, KeyArea, MapInfo, KEY_AREAS, SUMMONERS_RIFT};

#[derive(Debug, Serialize)]
pub struct MapResponse {
    #[serde(flatten)]
    pub info: MapInfo,
    pub key_areas: Vec<KeyArea>,
}

pub async fn map_info(
    State(state): State<AppState>,
    Path(map_id): Path<String>,
) -> Result<Json<MapResponse>, ApiError> {
    let map_id: u32 = map_id
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid map id: {}", map_id)))?;
    let config =
        map_config(map_id).ok_or_else(|| ApiError::not_found(format!("Map {}", map_id)))?;

    let key_areas = if map_id == SUMMONERS_RIFT {
        KEY_AREAS.to_vec()
    } else {
        Vec::new()
    };
    let version = state.ddragon_version().await;

    Ok(Json(MapResponse {
        info: MapInfo::new(config, &version),
        key_areas,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::routes::test_support::{get_json, sample_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_summoners_rift() {
        let (status, json) = get_json(sample_app(), "/api/maps/11").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["map_name"], "Summoner's Rift");
        assert_eq!(json["bounds"]["min"]["x"], -120.0);
        assert_eq!(json["bounds"]["max"]["y"], 14980.0);
        assert_eq!(
            json["image_url"],
            "https://ddragon.leagueoflegends.com/cdn/13.24.1/img/map/map11.png"
        );

        let areas = json["key_areas"].as_array().unwrap();
        assert_eq!(areas.len(), 7);
        assert_eq!(areas[0]["name"], "Baron Pit");
        assert_eq!(areas[0]["importance"], "high");
    }

    #[tokio::test]
    async fn test_other_maps_have_no_key_areas() {
        let (status, json) = get_json(sample_app(), "/api/maps/12").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["map_name"], "Howling Abyss");
        assert_eq!(json["key_areas"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_unknown_map() {
        let (status, _) = get_json(sample_app(), "/api/maps/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_json(sample_app(), "/api/maps/rift").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
