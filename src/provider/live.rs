//! Provider backed by the upstream API.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::fetch::RiotClient;
use crate::models::{MatchDetail, MatchId, MatchTimeline, PlayerHandle, Puuid, Region, Summoner};

use super::{DataProvider, ProviderError, Sourced};

pub struct LiveProvider {
    client: Arc<RiotClient>,
}

impl LiveProvider {
    pub fn new(client: Arc<RiotClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DataProvider for LiveProvider {
    fn name(&self) -> &'static str {
        "riot"
    }

    async fn resolve_player(
        &self,
        region: Region,
        handle: &PlayerHandle,
    ) -> Result<Sourced<Summoner>, ProviderError> {
        debug!("Resolving {} on {}", handle, region);
        let summoner = match handle {
            PlayerHandle::RiotId {
                game_name,
                tag_line,
            } => {
                self.client
                    .summoner_by_riot_id(region, game_name, tag_line)
                    .await?
            }
            PlayerHandle::SummonerName(name) => self.client.summoner_by_name(region, name).await?,
        };
        Ok(Sourced::live(summoner))
    }

    async fn list_matches(
        &self,
        region: Region,
        puuid: &Puuid,
        count: u32,
    ) -> Result<Sourced<Vec<MatchId>>, ProviderError> {
        let ids = self.client.match_ids(region, puuid, count).await?;
        Ok(Sourced::live(ids))
    }

    async fn match_detail(
        &self,
        region: Region,
        match_id: &MatchId,
    ) -> Result<Sourced<MatchDetail>, ProviderError> {
        let detail = self.client.match_detail(region, match_id).await?;
        Ok(Sourced::live(detail))
    }

    /// The timeline endpoint lacks teams and the map, so the match record is
    /// fetched first.
    async fn match_timeline(
        &self,
        region: Region,
        match_id: &MatchId,
    ) -> Result<Sourced<MatchTimeline>, ProviderError> {
        let detail = self.client.match_detail(region, match_id).await?;
        let timeline = self.client.match_timeline(region, &detail).await?;
        Ok(Sourced::live(timeline))
    }
}
