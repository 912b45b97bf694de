//! In-game timeline events: ward activity and objectives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Game-world position in map units.
///
/// Coordinates are kept as the integers the upstream API reports so that two
/// events at the same spot compare equal exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One of the two fixed teams.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub enum TeamId {
    #[default]
    Blue,
    Red,
}

impl TeamId {
    pub fn as_u16(&self) -> u16 {
        match self {
            TeamId::Blue => 100,
            TeamId::Red => 200,
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

impl TryFrom<u16> for TeamId {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            100 => Ok(TeamId::Blue),
            200 => Ok(TeamId::Red),
            other => Err(format!("Unknown team id: {}", other)),
        }
    }
}

impl From<TeamId> for u16 {
    fn from(team: TeamId) -> Self {
        team.as_u16()
    }
}

/// Ward subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WardType {
    /// Stealth trinket with a short timer.
    YellowTrinket,
    /// Stealth trinket that lasts until killed.
    BlueTrinket,
    ControlWard,
    #[serde(other)]
    Unknown,
}

/// How long a stealth (yellow) trinket stays on the map.
pub const YELLOW_TRINKET_LIFETIME_MS: u64 = 90_000;

/// Timer applied to ward types without a known policy.
pub const DEFAULT_WARD_LIFETIME_MS: u64 = 180_000;

impl WardType {
    /// Map an upstream ward type string onto the types tracked here.
    ///
    /// The legacy sight ward is folded into the yellow trinket.
    pub fn from_upstream(raw: &str) -> Self {
        match raw {
            "YELLOW_TRINKET" | "SIGHT_WARD" => WardType::YellowTrinket,
            "BLUE_TRINKET" | "FARSIGHT_ALTERATION" => WardType::BlueTrinket,
            "CONTROL_WARD" | "VISION_WARD" => WardType::ControlWard,
            _ => WardType::Unknown,
        }
    }

    /// Natural lifetime after placement; `None` means the ward only leaves the
    /// map when killed.
    pub fn lifetime_ms(&self) -> Option<u64> {
        match self {
            WardType::YellowTrinket => Some(YELLOW_TRINKET_LIFETIME_MS),
            WardType::BlueTrinket | WardType::ControlWard => None,
            WardType::Unknown => Some(DEFAULT_WARD_LIFETIME_MS),
        }
    }

    pub fn category(&self) -> WardCategory {
        match self {
            WardType::YellowTrinket | WardType::Unknown => WardCategory::Stealth,
            WardType::BlueTrinket => WardCategory::Farsight,
            WardType::ControlWard => WardCategory::Control,
        }
    }
}

/// Display grouping used by the vision overlay filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WardCategory {
    Stealth,
    Control,
    Farsight,
}

impl WardCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "stealth" => Some(WardCategory::Stealth),
            "control" => Some(WardCategory::Control),
            "farsight" => Some(WardCategory::Farsight),
            _ => None,
        }
    }
}

/// Payload shared by ward placement, kill and expiry events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardEvent {
    /// Milliseconds from game start.
    pub timestamp: u64,
    pub position: Position,
    pub ward_type: WardType,
    pub team_id: TeamId,
    pub participant_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killer_id: Option<u32>,
}

/// Payload for objective events (monsters, buildings, champion kills).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveEvent {
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monster_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,
    pub team_id: TeamId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<u32>,
}

/// A timeline event, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    WardPlaced(WardEvent),
    WardKill(WardEvent),
    WardExpired(WardEvent),
    EliteMonsterKill(ObjectiveEvent),
    BuildingKill(ObjectiveEvent),
    ChampionKill(ObjectiveEvent),
}

impl GameEvent {
    pub fn timestamp(&self) -> u64 {
        match self {
            GameEvent::WardPlaced(w) | GameEvent::WardKill(w) | GameEvent::WardExpired(w) => {
                w.timestamp
            }
            GameEvent::EliteMonsterKill(o)
            | GameEvent::BuildingKill(o)
            | GameEvent::ChampionKill(o) => o.timestamp,
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            GameEvent::WardPlaced(w) | GameEvent::WardKill(w) | GameEvent::WardExpired(w) => {
                Some(w.position)
            }
            GameEvent::EliteMonsterKill(o)
            | GameEvent::BuildingKill(o)
            | GameEvent::ChampionKill(o) => o.position,
        }
    }

    pub fn team_id(&self) -> TeamId {
        match self {
            GameEvent::WardPlaced(w) | GameEvent::WardKill(w) | GameEvent::WardExpired(w) => {
                w.team_id
            }
            GameEvent::EliteMonsterKill(o)
            | GameEvent::BuildingKill(o)
            | GameEvent::ChampionKill(o) => o.team_id,
        }
    }

    /// The ward payload, for ward events.
    pub fn as_ward(&self) -> Option<&WardEvent> {
        match self {
            GameEvent::WardPlaced(w) | GameEvent::WardKill(w) | GameEvent::WardExpired(w) => {
                Some(w)
            }
            _ => None,
        }
    }

    pub fn is_ward(&self) -> bool {
        self.as_ward().is_some()
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            GameEvent::WardPlaced(_) => "WARD_PLACED",
            GameEvent::WardKill(_) => "WARD_KILL",
            GameEvent::WardExpired(_) => "WARD_EXPIRED",
            GameEvent::EliteMonsterKill(_) => "ELITE_MONSTER_KILL",
            GameEvent::BuildingKill(_) => "BUILDING_KILL",
            GameEvent::ChampionKill(_) => "CHAMPION_KILL",
        }
    }
}
