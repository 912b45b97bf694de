//! Match records: per-participant totals and the reconstructed timeline.

use serde::{Deserialize, Serialize};

use super::{GameEvent, MatchId, Puuid, TeamId};

/// End-of-game totals for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub puuid: Puuid,
    pub summoner_name: String,
    pub champion_id: u32,
    pub champion_name: String,
    pub team_id: TeamId,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub total_minions_killed: u32,
    pub neutral_minions_killed: u32,
    pub gold_earned: u32,
    pub total_damage_dealt_to_champions: u32,
    pub vision_score: u32,
    pub wards_placed: u32,
    pub wards_killed: u32,
}

impl ParticipantStats {
    /// Lane and jungle minions combined, saturating on corrupt counts.
    pub fn total_cs(&self) -> u32 {
        self.total_minions_killed
            .saturating_add(self.neutral_minions_killed)
    }
}

/// One finished match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub match_id: MatchId,
    pub map_id: u32,
    /// Epoch milliseconds.
    pub game_creation: i64,
    /// Seconds.
    pub game_duration: u64,
    pub game_mode: String,
    pub game_type: String,
    pub participants: Vec<ParticipantStats>,
}

impl MatchDetail {
    pub fn participant(&self, puuid: &Puuid) -> Option<&ParticipantStats> {
        self.participants.iter().find(|p| &p.puuid == puuid)
    }
}

/// Lightweight participant entry shown next to a timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    /// 1-based index into the match's participant list.
    pub participant_id: u32,
    pub summoner_name: String,
    pub team_id: TeamId,
    pub champion_name: String,
}

/// Events of one match in upstream order plus the context needed to render them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchTimeline {
    pub match_id: MatchId,
    pub map_id: u32,
    /// Milliseconds.
    pub game_duration: u64,
    pub events: Vec<GameEvent>,
    pub participants: Vec<ParticipantInfo>,
}

impl MatchTimeline {
    pub fn ward_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(|e| e.is_ward())
    }

    pub fn objective_events(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().filter(|e| !e.is_ward())
    }
}
