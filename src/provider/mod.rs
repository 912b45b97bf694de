//! Data providers: where player, match and timeline data come from.
//!
//! - [`LiveProvider`]: the upstream API through [`RiotClient`](crate::fetch::RiotClient)
//! - [`SampleProvider`]: the built-in [`SampleData`]
//! - [`FallbackProvider`]: live first, sample data when live is unavailable
//!
//! Every result is tagged with whether it came from sample data.

mod live;
mod sample;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::fetch::FetchError;
use crate::models::{MatchDetail, MatchId, MatchTimeline, PlayerHandle, Puuid, Region, Summoner};

pub use live::LiveProvider;
pub use sample::SampleData;

/// Provider failures, classified by how callers should react.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request itself is wrong; never retried against sample data.
    #[error("{0}")]
    InvalidInput(String),

    #[error("{message}")]
    NotFound {
        message: String,
        suggestions: Vec<String>,
    },

    #[error("Rate limited by the Riot API, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Access denied by the Riot API: {0}")]
    Forbidden(String),

    /// Live data could not be obtained; sample data may stand in.
    #[error("Riot API unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    pub fn falls_back(&self) -> bool {
        matches!(self, ProviderError::Unavailable(_))
    }
}

impl From<FetchError> for ProviderError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound { resource } => ProviderError::NotFound {
                message: format!("{} not found", resource),
                suggestions: vec![
                    "Check the spelling and the selected region".to_string(),
                    "Riot IDs are written GameName#TAG".to_string(),
                ],
            },
            FetchError::RateLimited { retry_after_secs } => {
                ProviderError::RateLimited { retry_after_secs }
            }
            FetchError::Forbidden { resource } => ProviderError::Forbidden(resource),
            other => ProviderError::Unavailable(other.to_string()),
        }
    }
}

/// A value plus whether it came from sample data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub is_sample: bool,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            is_sample: false,
        }
    }

    pub fn sample(data: T) -> Self {
        Self {
            data,
            is_sample: true,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            is_sample: self.is_sample,
        }
    }
}

/// Source of game data.
#[async_trait]
pub trait DataProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn resolve_player(
        &self,
        region: Region,
        handle: &PlayerHandle,
    ) -> Result<Sourced<Summoner>, ProviderError>;

    /// Most recent match ids, newest first, at most `count`.
    async fn list_matches(
        &self,
        region: Region,
        puuid: &Puuid,
        count: u32,
    ) -> Result<Sourced<Vec<MatchId>>, ProviderError>;

    async fn match_detail(
        &self,
        region: Region,
        match_id: &MatchId,
    ) -> Result<Sourced<MatchDetail>, ProviderError>;

    async fn match_timeline(
        &self,
        region: Region,
        match_id: &MatchId,
    ) -> Result<Sourced<MatchTimeline>, ProviderError>;

    /// Match record looked up on behalf of `puuid`.
    ///
    /// Sources that cannot vouch for the player's presence (sample data) make
    /// sure the record lists them.
    async fn player_match_detail(
        &self,
        region: Region,
        match_id: &MatchId,
        _puuid: &Puuid,
    ) -> Result<Sourced<MatchDetail>, ProviderError> {
        self.match_detail(region, match_id).await
    }
}

/// Serves [`SampleData`] only.
#[derive(Debug, Clone)]
pub struct SampleProvider {
    data: Arc<SampleData>,
}

impl SampleProvider {
    pub fn new(data: SampleData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    pub fn builtin() -> Self {
        Self::new(SampleData::builtin())
    }
}

#[async_trait]
impl DataProvider for SampleProvider {
    fn name(&self) -> &'static str {
        "sample"
    }

    async fn resolve_player(
        &self,
        _region: Region,
        handle: &PlayerHandle,
    ) -> Result<Sourced<Summoner>, ProviderError> {
        self.data.player(handle).cloned().map(Sourced::sample)
    }

    async fn list_matches(
        &self,
        _region: Region,
        puuid: &Puuid,
        count: u32,
    ) -> Result<Sourced<Vec<MatchId>>, ProviderError> {
        Ok(Sourced::sample(self.data.match_ids(puuid, count as usize)))
    }

    async fn match_detail(
        &self,
        _region: Region,
        match_id: &MatchId,
    ) -> Result<Sourced<MatchDetail>, ProviderError> {
        Ok(Sourced::sample(self.data.match_detail(match_id)))
    }

    async fn match_timeline(
        &self,
        _region: Region,
        match_id: &MatchId,
    ) -> Result<Sourced<MatchTimeline>, ProviderError> {
        Ok(Sourced::sample(self.data.timeline_for(match_id)))
    }

    async fn player_match_detail(
        &self,
        _region: Region,
        match_id: &MatchId,
        puuid: &Puuid,
    ) -> Result<Sourced<MatchDetail>, ProviderError> {
        Ok(Sourced::sample(self.data.match_detail_for(match_id, puuid)))
    }
}

/// Tries `primary` and answers from sample data when it is unavailable.
///
/// Not-found, rate-limit and access errors from the primary are returned as
/// they are: they describe the request, not the availability of the source.
pub struct FallbackProvider {
    primary: Option<Arc<dyn DataProvider>>,
    sample: SampleProvider,
}

impl FallbackProvider {
    pub fn new(primary: Option<Arc<dyn DataProvider>>, sample: SampleProvider) -> Self {
        Self { primary, sample }
    }

    /// Sample data only.
    pub fn sample_only(sample: SampleProvider) -> Self {
        Self::new(None, sample)
    }

    pub fn has_live_source(&self) -> bool {
        self.primary.is_some()
    }
}

macro_rules! with_fallback {
    ($self:ident, $op:literal, $call:ident($($arg:expr),*)) => {{
        match &$self.primary {
            None => $self.sample.$call($($arg),*).await,
            Some(primary) => match primary.$call($($arg),*).await {
                Err(e) if e.falls_back() => {
                    warn!("{} {} failed ({}), serving sample data", primary.name(), $op, e);
                    $self.sample.$call($($arg),*).await
                }
                other => other,
            },
        }
    }};
}

#[async_trait]
impl DataProvider for FallbackProvider {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn resolve_player(
        &self,
        region: Region,
        handle: &PlayerHandle,
    ) -> Result<Sourced<Summoner>, ProviderError> {
        with_fallback!(self, "summoner lookup", resolve_player(region, handle))
    }

    async fn list_matches(
        &self,
        region: Region,
        puuid: &Puuid,
        count: u32,
    ) -> Result<Sourced<Vec<MatchId>>, ProviderError> {
        with_fallback!(self, "match history", list_matches(region, puuid, count))
    }

    async fn match_detail(
        &self,
        region: Region,
        match_id: &MatchId,
    ) -> Result<Sourced<MatchDetail>, ProviderError> {
        with_fallback!(self, "match detail", match_detail(region, match_id))
    }

    async fn match_timeline(
        &self,
        region: Region,
        match_id: &MatchId,
    ) -> Result<Sourced<MatchTimeline>, ProviderError> {
        with_fallback!(self, "match timeline", match_timeline(region, match_id))
    }

    async fn player_match_detail(
        &self,
        region: Region,
        match_id: &MatchId,
        puuid: &Puuid,
    ) -> Result<Sourced<MatchDetail>, ProviderError> {
        with_fallback!(
            self,
            "match detail",
            player_match_detail(region, match_id, puuid)
        )
    }
}
