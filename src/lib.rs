//! # Rift Insight
//!
//! Backend for a League of Legends match analytics dashboard.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (regions, players, matches, timeline events)
//! - **fetch**: Typed client for the upstream REST API
//! - **provider**: Live data with a sample-data fallback
//! - **calculate**: Per-match metrics and player summaries
//! - **timeline**: Frame bucketing and active-ward reconstruction
//! - **map**: Map table and overlay coordinate transform
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod map;
pub mod models;
pub mod provider;
pub mod timeline;

pub use models::*;

/// Parse a game-clock string into milliseconds from game start.
///
/// Accepts `"mm:ss"`, a suffixed value (`"90s"`, `"12m"`, `"1500ms"`) or a
/// bare number of milliseconds.
pub fn parse_game_time(s: &str) -> Option<u64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some((minutes, seconds)) = s.split_once(':') {
        let minutes: u64 = minutes.trim().parse().ok()?;
        let seconds: u64 = seconds.trim().parse().ok()?;
        if seconds >= 60 {
            return None;
        }
        return minutes
            .checked_mul(60)?
            .checked_add(seconds)?
            .checked_mul(1000);
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60_000)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1000)
    } else {
        (s, 1)
    };

    let num: u64 = num_str.trim().parse().ok()?;
    num.checked_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_game_time_clock() {
        assert_eq!(parse_game_time("11:30"), Some(690_000));
        assert_eq!(parse_game_time("0:00"), Some(0));
        assert_eq!(parse_game_time("45:05"), Some(2_705_000));
    }

    #[test]
    fn test_parse_game_time_clock_rejects_bad_seconds() {
        assert_eq!(parse_game_time("1:60"), None);
        assert_eq!(parse_game_time("1:xx"), None);
        assert_eq!(parse_game_time(":30"), None);
    }

    #[test]
    fn test_parse_game_time_minutes() {
        assert_eq!(parse_game_time("12m"), Some(720_000));
    }

    #[test]
    fn test_parse_game_time_seconds() {
        assert_eq!(parse_game_time("90s"), Some(90_000));
    }

    #[test]
    fn test_parse_game_time_millis() {
        assert_eq!(parse_game_time("1500ms"), Some(1500));
        assert_eq!(parse_game_time("690000"), Some(690_000));
    }

    #[test]
    fn test_parse_game_time_invalid() {
        assert_eq!(parse_game_time("abc"), None);
        assert_eq!(parse_game_time(""), None);
        assert_eq!(parse_game_time("-5s"), None);
    }

    #[test]
    fn test_parse_game_time_overflow() {
        assert_eq!(parse_game_time("99999999999999999999m"), None);
        assert_eq!(parse_game_time(&format!("{}m", u64::MAX / 1000)), None);
    }
}
