use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rift_insight::api::state::AppState;
use rift_insight::calculate::{match_metrics, summarize_matches};
use rift_insight::config::AppConfig;
use rift_insight::fetch::RiotClient;
use rift_insight::models::{MatchId, PlayerHandle, Region};
use rift_insight::parse_game_time;
use rift_insight::timeline::{
    active_wards_at, bucket_wards_then_objectives, VisionReplay, FRAME_INTERVAL_MS,
};

#[derive(Parser)]
#[command(name = "rift-insight")]
#[command(about = "Match analytics and vision timeline backend for League of Legends")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,

        /// Log all HTTP requests
        #[arg(long)]
        access_log: bool,
    },

    /// Print a match timeline frame by frame
    Timeline {
        match_id: String,

        /// Platform region (e.g. "kr", "euw1")
        #[arg(long)]
        region: Option<String>,

        /// Also list the wards active at this game time ("11:30", "90s", ms)
        #[arg(long)]
        at: Option<String>,
    },

    /// Print recent match metrics for a player
    Metrics {
        /// Summoner name or Riot ID ("name#tag")
        player: String,

        #[arg(long)]
        region: Option<String>,

        /// Number of matches
        #[arg(long, default_value = "10")]
        count: u32,
    },

    /// Probe the upstream status endpoint with the configured key
    CheckApi {
        #[arg(long)]
        region: Option<String>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn region_or_default(raw: Option<&str>, config: &AppConfig) -> Result<Region> {
    match raw {
        Some(r) => Ok(r.parse()?),
        None => Ok(config.riot.default_region),
    }
}

fn clock(ms: u64) -> String {
    format!("{:02}:{:02}", ms / 60_000, ms / 1000 % 60)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env: {}", e);
        }
    }

    let config = AppConfig::load(Some(&cli.config))
        .with_context(|| format!("Loading {}", cli.config.display()))?;

    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_tracing(&level, cli.json_logs);

    tracing::info!("Starting rift-insight v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve {
            host,
            port,
            access_log,
        } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::from_config(config);
            let mut app = rift_insight::api::build_router(state);
            if access_log {
                app = app.layer(TraceLayer::new_for_http());
            }

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Binding {}", addr))?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Timeline {
            match_id,
            region,
            at,
        } => {
            let region = region_or_default(region.as_deref(), &config)?;
            let at = match at.as_deref() {
                Some(raw) => match parse_game_time(raw) {
                    Some(t) => Some(t),
                    None => bail!("Invalid game time: {} (expected mm:ss, 90s, 12m or ms)", raw),
                },
                None => None,
            };

            let state = AppState::from_config(config);
            let sourced = state
                .provider
                .match_timeline(region, &MatchId::new(match_id))
                .await?;
            let timeline = sourced.data;

            println!("\n=== Timeline {} ===", timeline.match_id);
            println!("Map:       {}", timeline.map_id);
            println!("Duration:  {}", clock(timeline.game_duration));
            if sourced.is_sample {
                println!("(sample data)");
            }

            let mut replay = VisionReplay::new();
            for frame in bucket_wards_then_objectives(&timeline.events, timeline.game_duration) {
                if frame.events.is_empty() {
                    continue;
                }
                let frame_end = (frame.timestamp + FRAME_INTERVAL_MS - 1).min(timeline.game_duration);
                replay.advance_to(&timeline.events, frame_end);
                println!(
                    "\n[{}] wards up at {}: {}",
                    clock(frame.timestamp),
                    clock(frame_end),
                    replay.active().len()
                );
                for event in frame.events {
                    let pos = event
                        .position()
                        .map(|p| format!("({}, {})", p.x, p.y))
                        .unwrap_or_default();
                    println!(
                        "  {} {:<20} team {} {}",
                        clock(event.timestamp()),
                        event.kind_name(),
                        event.team_id(),
                        pos
                    );
                }
            }

            if let Some(t) = at {
                let t = t.min(timeline.game_duration);
                let wards = active_wards_at(&timeline.events, t);
                println!("\n=== Active wards at {} ({}) ===", clock(t), wards.len());
                for ward in wards {
                    let expiry = ward.expires_at.map(clock).unwrap_or_else(|| "-".to_string());
                    println!(
                        "  {:?} team {} at ({}, {}) placed {} expires {}",
                        ward.ward_type,
                        ward.team_id,
                        ward.position.x,
                        ward.position.y,
                        clock(ward.placed_at),
                        expiry
                    );
                }
            }
        }
        Commands::Metrics {
            player,
            region,
            count,
        } => {
            let region = region_or_default(region.as_deref(), &config)?;
            let handle = PlayerHandle::parse(&player)?;

            let state = AppState::from_config(config);
            let summoner = state.provider.resolve_player(region, &handle).await?;
            let ids = state
                .provider
                .list_matches(region, &summoner.data.puuid, count.clamp(1, 100))
                .await?;

            let mut is_sample = summoner.is_sample || ids.is_sample;
            let mut matches = Vec::new();
            for id in &ids.data {
                let detail = state
                    .provider
                    .player_match_detail(region, id, &summoner.data.puuid)
                    .await?;
                is_sample |= detail.is_sample;
                match detail.data.participant(&summoner.data.puuid) {
                    Some(p) => matches.push(match_metrics(&detail.data, p)),
                    None => tracing::warn!("{} does not list {}", id, summoner.data.name),
                }
            }

            println!("\n=== {} ({}) ===", summoner.data.name, region);
            if is_sample {
                println!("(sample data)");
            }
            println!(
                "{:<16} {:<12} {:>6} {:>8} {:>9} {:>9} {:>4}",
                "Match", "Champion", "KDA", "CS/min", "Gold/min", "Dmg/min", "Win"
            );
            for m in &matches {
                println!(
                    "{:<16} {:<12} {:>6.2} {:>8.2} {:>9.2} {:>9.2} {:>4}",
                    m.match_id.as_str(),
                    m.champion_name,
                    m.metrics.kda,
                    m.metrics.cs_per_min,
                    m.metrics.gold_per_min,
                    m.metrics.damage_per_min,
                    if m.win { "W" } else { "L" }
                );
            }

            let summary = summarize_matches(&matches);
            println!("\nMatches:        {}", summary.total_matches);
            println!("Avg KDA:        {:.2}", summary.avg_kda);
            println!("Avg CS/min:     {:.2}", summary.avg_cs_per_min);
            println!("Avg Gold/min:   {:.2}", summary.avg_gold_per_min);
            println!("Avg Dmg/min:    {:.2}", summary.avg_damage_per_min);
            println!("Win rate:       {}%", summary.win_rate);
            println!("Favorite:       {}", summary.favorite_champion);
        }
        Commands::CheckApi { region } => {
            let region = region_or_default(region.as_deref(), &config)?;
            let Some(client_config) = config.riot.client_config() else {
                bail!("RIOT_API_KEY is not set (environment, .env or [riot] api_key)");
            };
            let client = RiotClient::new(client_config)?;

            let probe = client.platform_status(region).await?;
            println!("\n=== Status probe {} ===", region);
            println!("HTTP status:  {}", probe.status);
            println!("Success:      {}", probe.success);
            if let Some(name) = &probe.server_name {
                println!("Server:       {}", name);
            }
            if let Some(details) = &probe.error_details {
                println!("Details:      {}", details);
            }
            if !probe.success {
                bail!("Status probe failed with HTTP {}", probe.status);
            }
        }
    }

    Ok(())
}
