//! HTTP client for the Riot Games API and Data Dragon.
//!
//! Platform endpoints (summoner, status) are addressed by region host, account
//! and match endpoints by the region's routing cluster. Every request carries
//! the API key header; nothing is retried or cached.

mod raw;

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use url::Url;

use crate::models::{MatchDetail, MatchId, MatchTimeline, Puuid, Region, Summoner};

pub use raw::{
    into_timeline, RawAccount, RawEvent, RawFrame, RawMatch, RawPlatformStatus, RawSummoner,
    RawTimeline,
};

const API_KEY_HEADER: &str = "x-riot-token";
const DDRAGON_VERSIONS_URL: &str = "https://ddragon.leagueoflegends.com/api/versions.json";

/// Errors that can occur talking to the upstream API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Riot API key is not configured")]
    MissingApiKey,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("API key rejected for {resource} (403)")]
    Forbidden { resource: String },

    #[error("API key invalid or expired (401)")]
    Unauthorized,

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Map a non-success upstream status onto a [`FetchError`].
///
/// `retry_after` is the raw `Retry-After` header, defaulting to 60 seconds.
pub fn classify_status(status: StatusCode, retry_after: Option<&str>, resource: &str) -> FetchError {
    match status {
        StatusCode::NOT_FOUND => FetchError::NotFound {
            resource: resource.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited {
            retry_after_secs: retry_after
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(60),
        },
        StatusCode::FORBIDDEN => FetchError::Forbidden {
            resource: resource.to_string(),
        },
        StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
        other => FetchError::HttpStatus {
            status: other.as_u16(),
            message: other.canonical_reason().unwrap_or("Unknown").to_string(),
        },
    }
}

/// Configuration for the Riot API client.
#[derive(Debug, Clone)]
pub struct RiotClientConfig {
    pub api_key: String,

    /// Timeout for data requests
    pub timeout: Duration,

    /// Timeout for the platform status probe
    pub status_timeout: Duration,

    pub user_agent: String,
}

impl RiotClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
            status_timeout: Duration::from_secs(5),
            user_agent: format!("rift-insight/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Outcome of the platform status probe.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StatusProbe {
    pub status: u16,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

/// Typed client over the upstream REST endpoints.
pub struct RiotClient {
    client: Client,
    config: RiotClientConfig,
}

impl RiotClient {
    /// Create a client; fails without an API key.
    pub fn new(config: RiotClientConfig) -> Result<Self, FetchError> {
        if config.api_key.trim().is_empty() {
            return Err(FetchError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("rift-insight")),
        );
        let mut key = HeaderValue::from_str(config.api_key.trim())
            .map_err(|_| FetchError::MissingApiKey)?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Look up an account by Riot ID on the region's routing cluster.
    pub async fn account_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> Result<RawAccount, FetchError> {
        let url = regional_url(
            region,
            &["riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line],
        )?;
        self.get_json(url, &format!("Riot ID {}#{}", game_name, tag_line))
            .await
    }

    pub async fn summoner_by_name(&self, region: Region, name: &str) -> Result<Summoner, FetchError> {
        let url = platform_url(region, &["lol", "summoner", "v4", "summoners", "by-name", name])?;
        let raw: RawSummoner = self.get_json(url, &format!("Summoner {}", name)).await?;
        let mut summoner = raw.into_summoner(None);
        if summoner.name.is_empty() {
            summoner.name = name.to_string();
        }
        Ok(summoner)
    }

    pub async fn summoner_by_puuid(
        &self,
        region: Region,
        puuid: &Puuid,
    ) -> Result<RawSummoner, FetchError> {
        let url = platform_url(
            region,
            &["lol", "summoner", "v4", "summoners", "by-puuid", puuid.as_str()],
        )?;
        self.get_json(url, &format!("Summoner {}", puuid)).await
    }

    /// Resolve a Riot ID to a summoner: account lookup, then summoner by PUUID.
    pub async fn summoner_by_riot_id(
        &self,
        region: Region,
        game_name: &str,
        tag_line: &str,
    ) -> Result<Summoner, FetchError> {
        let account = self.account_by_riot_id(region, game_name, tag_line).await?;
        let puuid = Puuid::new(account.puuid.clone());
        let raw = self.summoner_by_puuid(region, &puuid).await?;
        Ok(raw.into_summoner(Some(&account)))
    }

    /// Most recent ranked match ids, newest first.
    pub async fn match_ids(
        &self,
        region: Region,
        puuid: &Puuid,
        count: u32,
    ) -> Result<Vec<MatchId>, FetchError> {
        let mut url = regional_url(
            region,
            &["lol", "match", "v5", "matches", "by-puuid", puuid.as_str(), "ids"],
        )?;
        url.query_pairs_mut()
            .append_pair("start", "0")
            .append_pair("count", &count.to_string())
            .append_pair("type", "ranked");

        let ids: Vec<String> = self
            .get_json(url, &format!("Match history for {}", puuid))
            .await?;
        Ok(ids.into_iter().map(MatchId::new).collect())
    }

    pub async fn match_detail(
        &self,
        region: Region,
        match_id: &MatchId,
    ) -> Result<MatchDetail, FetchError> {
        let url = regional_url(region, &["lol", "match", "v5", "matches", match_id.as_str()])?;
        let raw: RawMatch = self.get_json(url, &format!("Match {}", match_id)).await?;
        Ok(raw.into())
    }

    /// Timeline of a match, with teams and participants taken from `detail`.
    pub async fn match_timeline(
        &self,
        region: Region,
        detail: &MatchDetail,
    ) -> Result<MatchTimeline, FetchError> {
        let url = regional_url(
            region,
            &["lol", "match", "v5", "matches", detail.match_id.as_str(), "timeline"],
        )?;
        let raw: RawTimeline = self
            .get_json(url, &format!("Timeline {}", detail.match_id))
            .await?;
        Ok(into_timeline(raw, detail))
    }

    /// Hit the platform status endpoint with the short probe timeout.
    ///
    /// Non-success statuses are reported in the probe rather than as errors.
    pub async fn platform_status(&self, region: Region) -> Result<StatusProbe, FetchError> {
        let url = platform_url(region, &["lol", "status", "v4", "platform-data"])?;
        let secs = self.config.status_timeout.as_secs();

        let probe = async {
            let response = self.client.get(url.as_str()).send().await?;
            let status = response.status();
            let body = response.text().await?;

            Ok::<_, FetchError>(if status.is_success() {
                let platform: RawPlatformStatus = serde_json::from_str(&body)?;
                StatusProbe {
                    status: status.as_u16(),
                    success: true,
                    server_name: Some(platform.name),
                    error_details: None,
                }
            } else {
                StatusProbe {
                    status: status.as_u16(),
                    success: false,
                    server_name: None,
                    error_details: Some(body),
                }
            })
        };

        tokio::time::timeout(self.config.status_timeout, probe)
            .await
            .map_err(|_| FetchError::Timeout { secs })?
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, resource: &str) -> Result<T, FetchError> {
        debug!("GET {}", url.path());

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok());
            let err = classify_status(status, retry_after, resource);
            warn!("{} -> {}", url.path(), err);
            return Err(err);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn build_url(host: &str, segments: &[&str]) -> Result<Url, FetchError> {
    let base = format!("https://{}.api.riotgames.com", host);
    let mut url = Url::parse(&base).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(base.clone()))?
        .extend(segments);
    Ok(url)
}

/// URL on the region's own host (`https://jp1.api.riotgames.com/...`).
pub fn platform_url(region: Region, segments: &[&str]) -> Result<Url, FetchError> {
    build_url(region.platform(), segments)
}

/// URL on the region's routing cluster (`https://asia.api.riotgames.com/...`).
pub fn regional_url(region: Region, segments: &[&str]) -> Result<Url, FetchError> {
    build_url(region.regional_route().host(), segments)
}

/// Unauthenticated client for Data Dragon, bounded by `timeout`.
pub fn ddragon_client(timeout: Duration) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!("rift-insight/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Version held in `cell`, filled by `lookup` on first success.
///
/// A failed lookup answers with `fallback` and leaves the cell empty, so the
/// next caller tries again.
pub async fn cached_ddragon_version<F, Fut>(
    cell: &OnceCell<String>,
    lookup: F,
    fallback: &str,
) -> String
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, FetchError>>,
{
    match cell.get_or_try_init(lookup).await {
        Ok(version) => version.clone(),
        Err(e) => {
            info!("Data Dragon version lookup failed ({}), using {}", e, fallback);
            fallback.to_string()
        }
    }
}

pub async fn latest_ddragon_version(client: &Client) -> Result<String, FetchError> {
    let response = client.get(DDRAGON_VERSIONS_URL).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(classify_status(status, None, "Data Dragon versions"));
    }
    let versions: Vec<String> = serde_json::from_str(&response.text().await?)?;
    versions
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::NotFound {
            resource: "Data Dragon versions".to_string(),
        })
}
