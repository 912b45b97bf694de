//! REST API endpoints.
//!
//! Axum-based HTTP API serving player lookups, per-match metrics, timelines
//! and the vision overlay to the dashboard.

pub mod routes;
pub mod state;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};

use crate::models::{HandleError, Region, UnknownRegion};
use crate::provider::ProviderError;

use self::state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        suggestions: Vec<String>,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            ApiError::NotFound { suggestions, .. } => suggestions.clone(),
            ApiError::RateLimited { retry_after_secs } => vec![
                format!("Wait {} seconds before retrying", retry_after_secs),
                "Development keys are limited to 20 requests/second and 100 requests/2 minutes"
                    .to_string(),
            ],
            ApiError::Forbidden(_) => vec![
                "Development API keys expire every 24 hours; generate a new one at https://developer.riotgames.com".to_string(),
                "Check that RIOT_API_KEY is set and restart the server".to_string(),
            ],
            _ => Vec::new(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                suggestions: self.suggestions(),
            },
        };

        let mut response = (status, Json(body)).into_response();
        if let ApiError::RateLimited { retry_after_secs } = self {
            if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidInput(msg) => ApiError::BadRequest(msg),
            ProviderError::NotFound {
                message,
                suggestions,
            } => ApiError::NotFound {
                message,
                suggestions,
            },
            ProviderError::RateLimited { retry_after_secs } => {
                ApiError::RateLimited { retry_after_secs }
            }
            ProviderError::Forbidden(msg) => ApiError::Forbidden(msg),
            ProviderError::Unavailable(msg) => ApiError::Unavailable(msg),
        }
    }
}

impl From<HandleError> for ApiError {
    fn from(err: HandleError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<UnknownRegion> for ApiError {
    fn from(err: UnknownRegion) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Parse a region path segment, rejecting unknown ones before any lookup.
pub fn parse_region(raw: &str) -> Result<Region, ApiError> {
    Ok(raw.parse::<Region>()?)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        "*" => layer.allow_origin(Any),
        other => match HeaderValue::from_str(other) {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                tracing::warn!("Invalid CORS origin {:?}, allowing any", other);
                layer.allow_origin(Any)
            }
        },
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/api/health", get(routes::status::health))
        .route("/api/debug", get(routes::status::debug))
        .route("/api/summoner/:region/:name", get(routes::players::summoner))
        .route("/api/matches/:region/:puuid", get(routes::players::matches))
        .route("/api/overview/:region", get(routes::players::overview))
        .route("/api/metrics/:region/:match_id", get(routes::metrics::match_metrics))
        .route(
            "/api/match-timeline/:region/:match_id",
            get(routes::timeline::match_timeline),
        )
        .route("/api/vision/:region/:match_id", get(routes::vision::vision_state))
        .route("/api/maps/:map_id", get(routes::maps::map_info))
        .layer(cors)
        .with_state(state)
}
