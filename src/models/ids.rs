//! Opaque identifiers handed out by the upstream game-data API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, opaque player identifier (distinct from any display handle).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Puuid(String);

impl Puuid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Puuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Puuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Puuid({})", self.0)
    }
}

impl From<String> for Puuid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Puuid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Match identifier, e.g. `KR_7200123456`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Platform prefix of the id (`KR` for `KR_7200123456`), if present.
    pub fn platform_prefix(&self) -> Option<&str> {
        self.0.split_once('_').map(|(prefix, _)| prefix)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}

impl From<String> for MatchId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MatchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puuid_display() {
        let id = Puuid::new("caps-puuid-123");
        assert_eq!(format!("{}", id), "caps-puuid-123");
    }

    #[test]
    fn test_puuid_debug() {
        let id = Puuid::from("debug-test");
        let debug_str = format!("{:?}", id);
        assert!(debug_str.contains("debug-test"));
    }

    #[test]
    fn test_match_id_platform_prefix() {
        assert_eq!(MatchId::from("KR_7200123456").platform_prefix(), Some("KR"));
        assert_eq!(MatchId::from("EUW1_6500123456").platform_prefix(), Some("EUW1"));
        assert_eq!(MatchId::from("7200123456").platform_prefix(), None);
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = MatchId::from("JP1_5800123456");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"JP1_5800123456\"");

        let parsed: Puuid = serde_json::from_str("\"eztowin-puuid-456\"").unwrap();
        assert_eq!(parsed.as_str(), "eztowin-puuid-456");
    }

    #[test]
    fn test_ids_equality() {
        assert_eq!(Puuid::from("same"), Puuid::from("same".to_string()));
        assert_ne!(MatchId::from("KR_1"), MatchId::from("KR_2"));
    }
}
