use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{parse_region, ApiError};
use crate::fetch::StatusProbe;
use crate::models::Region;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: &'static str,
    pub live_source: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.provider.name(),
        live_source: state.riot.is_some(),
    })
}

#[derive(Debug, Deserialize)]
pub struct DebugParams {
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub timestamp: String,
    pub region: Region,
    pub api_key_present: bool,
    pub api_key_length: usize,
    pub api_key_prefix: String,
    pub use_mock_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_test: Option<StatusProbe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_error: Option<String>,
}

/// Shown in place of the key: enough to tell keys apart, never the whole key.
pub fn key_prefix(key: Option<&str>) -> String {
    match key {
        Some(key) if !key.is_empty() => {
            let prefix: String = key.chars().take(10).collect();
            format!("{}...", prefix)
        }
        _ => "Not found".to_string(),
    }
}

/// Key diagnostics plus a probe of the platform status endpoint.
pub async fn debug(
    State(state): State<AppState>,
    Query(params): Query<DebugParams>,
) -> Result<Json<DebugResponse>, ApiError> {
    let region = match params.region.as_deref() {
        Some(raw) => parse_region(raw)?,
        None => state.config.riot.default_region,
    };
    let key = state.config.riot.api_key();

    let (api_test, api_error) = match &state.riot {
        Some(client) => match client.platform_status(region).await {
            Ok(probe) => (Some(probe), None),
            Err(e) => {
                tracing::warn!("Status probe on {} failed: {}", region, e);
                (None, Some(e.to_string()))
            }
        },
        None => (None, Some("No live API client configured".to_string())),
    };

    Ok(Json(DebugResponse {
        timestamp: chrono::Utc::now().to_rfc3339(),
        region,
        api_key_present: key.is_some(),
        api_key_length: key.map_or(0, str::len),
        api_key_prefix: key_prefix(key),
        use_mock_data: state.config.riot.use_mock_data,
        api_test,
        api_error,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_support::{get_json, sample_app};
    use axum::http::StatusCode;

    #[test]
    fn test_key_prefix() {
        assert_eq!(key_prefix(Some("RGAPI-1234567890abcdef")), "RGAPI-1234...");
        assert_eq!(key_prefix(Some("short")), "short...");
        assert_eq!(key_prefix(Some("")), "Not found");
        assert_eq!(key_prefix(None), "Not found");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, json) = get_json(sample_app(), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["provider"], "fallback");
        assert_eq!(json["live_source"], false);
    }

    #[tokio::test]
    async fn test_debug_without_client() {
        let (status, json) = get_json(sample_app(), "/api/debug?region=euw1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["region"], "euw1");
        assert_eq!(json["api_key_present"], false);
        assert_eq!(json["api_key_length"], 0);
        assert_eq!(json["api_key_prefix"], "Not found");
        assert!(json.get("api_test").is_none());
        assert!(json["api_error"].is_string());
        assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_debug_defaults_region() {
        let (_, json) = get_json(sample_app(), "/api/debug").await;
        assert_eq!(json["region"], "jp1");

        let (status, _) = get_json(sample_app(), "/api/debug?region=nowhere").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
