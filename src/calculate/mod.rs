//! Metric calculation engine.
//!
//! Turns raw per-participant match totals into rate metrics:
//! - KDA, CS/min, gold/min and damage/min for a single match
//! - Averages, win rate and most-played champion across matches

use std::collections::HashMap;

use crate::models::{
    BasicMetrics, MatchDetail, MatchMetrics, ParticipantStats, PlayerSummary, RawStats,
};

/// Round to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// (kills + assists) / deaths, or kills + assists for a deathless game.
pub fn calculate_kda(kills: u32, deaths: u32, assists: u32) -> f64 {
    let takedowns = f64::from(kills) + f64::from(assists);
    if deaths == 0 {
        takedowns
    } else {
        takedowns / deaths as f64
    }
}

/// Rate of `total` per minute of a game lasting `duration_seconds`.
///
/// A zero-length game yields 0.0 rather than infinity.
pub fn per_minute(total: u32, duration_seconds: u64) -> f64 {
    if duration_seconds == 0 {
        return 0.0;
    }
    let minutes = duration_seconds as f64 / 60.0;
    total as f64 / minutes
}

/// Calculate the rounded rate metrics for one participant.
pub fn calculate_basic_metrics(
    participant: &ParticipantStats,
    duration_seconds: u64,
) -> BasicMetrics {
    BasicMetrics {
        kda: round2(calculate_kda(
            participant.kills,
            participant.deaths,
            participant.assists,
        )),
        cs_per_min: round2(per_minute(participant.total_cs(), duration_seconds)),
        gold_per_min: round2(per_minute(participant.gold_earned, duration_seconds)),
        damage_per_min: round2(per_minute(
            participant.total_damage_dealt_to_champions,
            duration_seconds,
        )),
    }
}

pub fn raw_stats(participant: &ParticipantStats) -> RawStats {
    RawStats {
        kills: participant.kills,
        deaths: participant.deaths,
        assists: participant.assists,
        total_cs: participant.total_cs(),
        gold_earned: participant.gold_earned,
        total_damage: participant.total_damage_dealt_to_champions,
        vision_score: participant.vision_score,
        wards_placed: participant.wards_placed,
        wards_killed: participant.wards_killed,
    }
}

/// Build the metrics record for `participant` in `detail`.
pub fn match_metrics(detail: &MatchDetail, participant: &ParticipantStats) -> MatchMetrics {
    MatchMetrics {
        match_id: detail.match_id.clone(),
        puuid: participant.puuid.clone(),
        champion_name: participant.champion_name.clone(),
        game_mode: detail.game_mode.clone(),
        game_duration: detail.game_duration,
        win: participant.win,
        metrics: calculate_basic_metrics(participant, detail.game_duration),
        raw_stats: raw_stats(participant),
    }
}

/// Average a player's per-match metrics.
///
/// KDA and CS/min keep two decimals; gold/min, damage/min and the win-rate
/// percentage are rounded to whole numbers. The favourite champion is the most
/// played one, ties going to whichever appeared first.
pub fn summarize_matches(matches: &[MatchMetrics]) -> PlayerSummary {
    if matches.is_empty() {
        return PlayerSummary::default();
    }

    let n = matches.len() as f64;
    let sum = |f: fn(&BasicMetrics) -> f64| matches.iter().map(|m| f(&m.metrics)).sum::<f64>();
    let wins = matches.iter().filter(|m| m.win).count() as f64;

    let mut champion_counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, m) in matches.iter().enumerate() {
        let entry = champion_counts
            .entry(m.champion_name.as_str())
            .or_insert((0, index));
        entry.0 += 1;
    }
    let favorite_champion = champion_counts
        .into_iter()
        .max_by(|a, b| a.1 .0.cmp(&b.1 .0).then_with(|| b.1 .1.cmp(&a.1 .1)))
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    PlayerSummary {
        avg_kda: round2(sum(|m| m.kda) / n),
        avg_cs_per_min: round2(sum(|m| m.cs_per_min) / n),
        avg_gold_per_min: (sum(|m| m.gold_per_min) / n).round(),
        avg_damage_per_min: (sum(|m| m.damage_per_min) / n).round(),
        total_matches: matches.len() as u32,
        win_rate: (wins / n * 100.0).round(),
        favorite_champion,
    }
}
