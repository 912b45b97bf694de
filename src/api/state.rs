use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;

use crate::config::AppConfig;
use crate::fetch::{cached_ddragon_version, ddragon_client, latest_ddragon_version, RiotClient};
use crate::provider::{DataProvider, FallbackProvider, LiveProvider, SampleProvider};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DataProvider>,
    pub config: Arc<AppConfig>,
    /// Present when an API key is configured and sample mode is off.
    pub riot: Option<Arc<RiotClient>>,
    /// Unauthenticated client for Data Dragon.
    pub http: reqwest::Client,
    ddragon_version: Arc<OnceCell<String>>,
}

impl AppState {
    /// Wire the live client (when configured) in front of the sample data.
    pub fn from_config(config: AppConfig) -> Self {
        let riot = if config.riot.use_mock_data {
            tracing::info!("USE_MOCK_DATA set, serving sample data only");
            None
        } else {
            match config.riot.client_config().map(RiotClient::new) {
                Some(Ok(client)) => Some(Arc::new(client)),
                Some(Err(e)) => {
                    tracing::warn!("Riot client unavailable ({}), serving sample data", e);
                    None
                }
                None => {
                    tracing::warn!("RIOT_API_KEY not set, serving sample data");
                    None
                }
            }
        };

        let primary = riot
            .clone()
            .map(|client| Arc::new(LiveProvider::new(client)) as Arc<dyn DataProvider>);
        let provider = FallbackProvider::new(primary, SampleProvider::builtin());

        let mut state = Self::with_provider(Arc::new(provider), config);
        state.riot = riot;
        state
    }

    /// State serving sample data only, never touching the network.
    pub fn sample_only(config: AppConfig) -> Self {
        let provider = FallbackProvider::sample_only(SampleProvider::builtin());
        Self::with_provider(Arc::new(provider), config)
    }

    /// State around an already assembled provider, without a live client.
    pub fn with_provider(provider: Arc<dyn DataProvider>, config: AppConfig) -> Self {
        let timeout = Duration::from_secs(config.riot.status_timeout_seconds);
        let http = ddragon_client(timeout).unwrap_or_else(|e| {
            tracing::warn!("Data Dragon client without timeout ({})", e);
            reqwest::Client::new()
        });

        Self {
            provider,
            config: Arc::new(config),
            riot: None,
            http,
            ddragon_version: Arc::new(OnceCell::new()),
        }
    }

    /// Data Dragon version for asset URLs, kept after the first successful lookup.
    ///
    /// Offline (no live client) the configured fallback is used directly.
    pub async fn ddragon_version(&self) -> String {
        let fallback = &self.config.riot.ddragon_fallback_version;
        if self.riot.is_none() {
            return fallback.clone();
        }
        cached_ddragon_version(
            &self.ddragon_version,
            || latest_ddragon_version(&self.http),
            fallback,
        )
        .await
    }
}
