//! Derived per-match and per-player metric models.

use serde::{Deserialize, Serialize};

use super::{MatchId, Puuid};

/// Rate metrics for one participant in one match, rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicMetrics {
    pub kda: f64,
    pub cs_per_min: f64,
    pub gold_per_min: f64,
    pub damage_per_min: f64,
}

/// The raw totals the metrics were derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStats {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub total_cs: u32,
    pub gold_earned: u32,
    pub total_damage: u32,
    pub vision_score: u32,
    pub wards_placed: u32,
    pub wards_killed: u32,
}

/// Metrics for one player in one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchMetrics {
    pub match_id: MatchId,
    pub puuid: Puuid,
    pub champion_name: String,
    pub game_mode: String,
    /// Seconds.
    pub game_duration: u64,
    pub win: bool,
    pub metrics: BasicMetrics,
    pub raw_stats: RawStats,
}

/// Averages over a player's recent matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub avg_kda: f64,
    pub avg_cs_per_min: f64,
    pub avg_gold_per_min: f64,
    pub avg_damage_per_min: f64,
    pub total_matches: u32,
    /// Percent, rounded to an integer.
    pub win_rate: f64,
    pub favorite_champion: String,
}

impl Default for PlayerSummary {
    fn default() -> Self {
        Self {
            avg_kda: 0.0,
            avg_cs_per_min: 0.0,
            avg_gold_per_min: 0.0,
            avg_damage_per_min: 0.0,
            total_matches: 0,
            win_rate: 0.0,
            favorite_champion: "Unknown".to_string(),
        }
    }
}
