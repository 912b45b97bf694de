//! Player identity: handles typed by users and the resolved summoner record.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Puuid;

/// What a user typed to look a player up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerHandle {
    /// `GameName#TAG`
    RiotId { game_name: String, tag_line: String },
    /// Legacy summoner name without a tag.
    SummonerName(String),
}

/// Reasons a handle is rejected before any lookup happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleError {
    #[error("Player name is empty")]
    Empty,

    #[error("Riot ID must look like GameName#TAG, got {0:?}")]
    MalformedRiotId(String),
}

impl PlayerHandle {
    pub fn parse(raw: &str) -> Result<Self, HandleError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HandleError::Empty);
        }

        match trimmed.split_once('#') {
            Some((name, tag)) => {
                let (name, tag) = (name.trim(), tag.trim());
                if name.is_empty() || tag.is_empty() || tag.contains('#') {
                    return Err(HandleError::MalformedRiotId(trimmed.to_string()));
                }
                Ok(PlayerHandle::RiotId {
                    game_name: name.to_string(),
                    tag_line: tag.to_string(),
                })
            }
            None => Ok(PlayerHandle::SummonerName(trimmed.to_string())),
        }
    }

    /// Lowercased, whitespace-collapsed form used for sample-data lookups.
    pub fn normalized(&self) -> String {
        normalize_name(&self.to_string())
    }
}

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerHandle::RiotId {
                game_name,
                tag_line,
            } => write!(f, "{}#{}", game_name, tag_line),
            PlayerHandle::SummonerName(name) => f.write_str(name),
        }
    }
}

/// Lowercase and collapse runs of whitespace to a single space.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A resolved player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summoner {
    pub puuid: Puuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_line: Option<String>,
    pub profile_icon_id: u32,
    pub summoner_level: u32,
    /// Epoch milliseconds of the last profile change.
    pub revision_date: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_riot_id() {
        let handle = PlayerHandle::parse("ezToWin#LOL").unwrap();
        assert_eq!(
            handle,
            PlayerHandle::RiotId {
                game_name: "ezToWin".to_string(),
                tag_line: "LOL".to_string(),
            }
        );
        assert_eq!(handle.normalized(), "eztowin#lol");
    }

    #[test]
    fn test_parse_legacy_name() {
        let handle = PlayerHandle::parse("  Hide   on bush ").unwrap();
        assert_eq!(handle, PlayerHandle::SummonerName("Hide   on bush".to_string()));
        assert_eq!(handle.normalized(), "hide on bush");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(PlayerHandle::parse("   "), Err(HandleError::Empty));
        assert!(matches!(
            PlayerHandle::parse("#KR1"),
            Err(HandleError::MalformedRiotId(_))
        ));
        assert!(matches!(
            PlayerHandle::parse("name#"),
            Err(HandleError::MalformedRiotId(_))
        ));
        assert!(matches!(
            PlayerHandle::parse("a#b#c"),
            Err(HandleError::MalformedRiotId(_))
        ));
    }

    #[test]
    fn test_display() {
        let handle = PlayerHandle::parse("TestPlayer#KR1").unwrap();
        assert_eq!(handle.to_string(), "TestPlayer#KR1");
    }
}
