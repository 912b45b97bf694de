//! Upstream payload shapes and their translation into the crate's models.

use serde::Deserialize;

use crate::models::{
    GameEvent, MatchDetail, MatchId, MatchTimeline, ObjectiveEvent, ParticipantInfo,
    ParticipantStats, Position, Puuid, Summoner, TeamId, WardEvent, WardType,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccount {
    pub puuid: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSummoner {
    pub puuid: String,
    /// Absent for accounts created after the move to Riot IDs.
    #[serde(default)]
    pub name: Option<String>,
    pub profile_icon_id: u32,
    pub summoner_level: u32,
    pub revision_date: i64,
}

impl RawSummoner {
    /// Build the summoner record, preferring the Riot ID when one was used
    /// for the lookup.
    pub fn into_summoner(self, account: Option<&RawAccount>) -> Summoner {
        let name = account
            .and_then(|a| a.game_name.clone())
            .or(self.name)
            .unwrap_or_default();

        Summoner {
            puuid: Puuid::new(self.puuid),
            name,
            tag_line: account.and_then(|a| a.tag_line.clone()),
            profile_icon_id: self.profile_icon_id,
            summoner_level: self.summoner_level,
            revision_date: self.revision_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadata {
    pub match_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMatch {
    pub metadata: RawMetadata,
    pub info: RawMatchInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatchInfo {
    pub game_creation: i64,
    /// Seconds.
    pub game_duration: u64,
    pub game_mode: String,
    pub game_type: String,
    #[serde(default)]
    pub map_id: u32,
    pub participants: Vec<RawParticipant>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParticipant {
    pub puuid: String,
    #[serde(default)]
    pub summoner_name: String,
    #[serde(default)]
    pub riot_id_game_name: Option<String>,
    pub champion_id: u32,
    pub champion_name: String,
    pub team_id: u16,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub total_minions_killed: u32,
    pub neutral_minions_killed: u32,
    pub gold_earned: u32,
    pub total_damage_dealt_to_champions: u32,
    #[serde(default)]
    pub vision_score: u32,
    #[serde(default)]
    pub wards_placed: u32,
    #[serde(default)]
    pub wards_killed: u32,
}

impl RawParticipant {
    fn display_name(&self) -> String {
        match &self.riot_id_game_name {
            Some(name) if self.summoner_name.is_empty() => name.clone(),
            _ => self.summoner_name.clone(),
        }
    }
}

impl From<RawParticipant> for ParticipantStats {
    fn from(raw: RawParticipant) -> Self {
        Self {
            summoner_name: raw.display_name(),
            puuid: Puuid::new(raw.puuid),
            champion_id: raw.champion_id,
            champion_name: raw.champion_name,
            team_id: TeamId::try_from(raw.team_id).unwrap_or_default(),
            win: raw.win,
            kills: raw.kills,
            deaths: raw.deaths,
            assists: raw.assists,
            total_minions_killed: raw.total_minions_killed,
            neutral_minions_killed: raw.neutral_minions_killed,
            gold_earned: raw.gold_earned,
            total_damage_dealt_to_champions: raw.total_damage_dealt_to_champions,
            vision_score: raw.vision_score,
            wards_placed: raw.wards_placed,
            wards_killed: raw.wards_killed,
        }
    }
}

impl From<RawMatch> for MatchDetail {
    fn from(raw: RawMatch) -> Self {
        Self {
            match_id: MatchId::new(raw.metadata.match_id),
            map_id: raw.info.map_id,
            game_creation: raw.info.game_creation,
            game_duration: raw.info.game_duration,
            game_mode: raw.info.game_mode,
            game_type: raw.info.game_type,
            participants: raw.info.participants.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTimeline {
    pub metadata: RawMetadata,
    pub info: RawTimelineInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTimelineInfo {
    #[serde(default)]
    pub frame_interval: Option<u64>,
    pub frames: Vec<RawFrame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFrame {
    pub timestamp: u64,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: u64,
    #[serde(default)]
    pub participant_id: Option<u32>,
    #[serde(default)]
    pub creator_id: Option<u32>,
    #[serde(default)]
    pub killer_id: Option<u32>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub ward_type: Option<String>,
    #[serde(default)]
    pub monster_type: Option<String>,
    #[serde(default)]
    pub building_type: Option<String>,
}

/// Team of a 1-based participant id, blue when it cannot be resolved.
fn team_of(participant_id: Option<u32>, participants: &[ParticipantInfo]) -> TeamId {
    participant_id
        .and_then(|id| participants.iter().find(|p| p.participant_id == id))
        .map(|p| p.team_id)
        .unwrap_or_default()
}

fn translate_event(raw: RawEvent, participants: &[ParticipantInfo]) -> Option<GameEvent> {
    match raw.kind.as_str() {
        "WARD_PLACED" | "WARD_KILL" => {
            // Ward events are correlated by position, so unplaceable ones are useless.
            let position = raw.position?;
            let actor = if raw.kind == "WARD_PLACED" {
                raw.creator_id.or(raw.participant_id)
            } else {
                raw.killer_id.or(raw.participant_id)
            };
            let ward = WardEvent {
                timestamp: raw.timestamp,
                position,
                ward_type: WardType::from_upstream(raw.ward_type.as_deref().unwrap_or_default()),
                team_id: team_of(actor, participants),
                participant_id: actor.unwrap_or(0),
                creator_id: raw.creator_id,
                killer_id: raw.killer_id,
            };
            Some(if raw.kind == "WARD_PLACED" {
                GameEvent::WardPlaced(ward)
            } else {
                GameEvent::WardKill(ward)
            })
        }
        "ELITE_MONSTER_KILL" | "BUILDING_KILL" | "CHAMPION_KILL" => {
            let actor = raw.killer_id.or(raw.participant_id);
            let objective = ObjectiveEvent {
                timestamp: raw.timestamp,
                position: raw.position,
                monster_type: raw.monster_type,
                building_type: raw.building_type,
                team_id: team_of(actor, participants),
                participant_id: actor,
            };
            Some(match raw.kind.as_str() {
                "ELITE_MONSTER_KILL" => GameEvent::EliteMonsterKill(objective),
                "BUILDING_KILL" => GameEvent::BuildingKill(objective),
                _ => GameEvent::ChampionKill(objective),
            })
        }
        _ => None,
    }
}

/// Flatten upstream frames into the event list of a [`MatchTimeline`].
///
/// Participant ids and the map come from the match record; the duration is
/// converted to milliseconds.
pub fn into_timeline(raw: RawTimeline, detail: &MatchDetail) -> MatchTimeline {
    let participants: Vec<ParticipantInfo> = detail
        .participants
        .iter()
        .enumerate()
        .map(|(index, p)| ParticipantInfo {
            participant_id: index as u32 + 1,
            summoner_name: p.summoner_name.clone(),
            team_id: p.team_id,
            champion_name: p.champion_name.clone(),
        })
        .collect();

    let events = raw
        .info
        .frames
        .into_iter()
        .flat_map(|frame| frame.events)
        .filter_map(|event| translate_event(event, &participants))
        .collect();

    MatchTimeline {
        match_id: MatchId::new(raw.metadata.match_id),
        map_id: detail.map_id,
        game_duration: detail.game_duration.saturating_mul(1000),
        events,
        participants,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlatformStatus {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MATCH_JSON: &str = r#"{
        "metadata": {"matchId": "JP1_42", "participants": ["a", "b"]},
        "info": {
            "gameCreation": 1704000000000,
            "gameDuration": 1800,
            "gameMode": "CLASSIC",
            "gameType": "MATCHED_GAME",
            "mapId": 11,
            "participants": [
                {"puuid": "a", "summonerName": "", "riotIdGameName": "ezToWin",
                 "championId": 157, "championName": "Yasuo", "teamId": 100, "win": true,
                 "kills": 5, "deaths": 0, "assists": 3, "totalMinionsKilled": 250,
                 "neutralMinionsKilled": 50, "goldEarned": 15000,
                 "totalDamageDealtToChampions": 24000, "visionScore": 20,
                 "wardsPlaced": 10, "wardsKilled": 2},
                {"puuid": "b", "summonerName": "Enemy",
                 "championId": 86, "championName": "Garen", "teamId": 200, "win": false,
                 "kills": 1, "deaths": 5, "assists": 0, "totalMinionsKilled": 180,
                 "neutralMinionsKilled": 0, "goldEarned": 9000,
                 "totalDamageDealtToChampions": 8000}
            ]
        }
    }"#;

    const TIMELINE_JSON: &str = r#"{
        "metadata": {"matchId": "JP1_42", "participants": ["a", "b"]},
        "info": {
            "frameInterval": 60000,
            "frames": [
                {"timestamp": 0, "events": [
                    {"type": "PAUSE_END", "timestamp": 0},
                    {"type": "WARD_PLACED", "timestamp": 90000, "creatorId": 2,
                     "wardType": "SIGHT_WARD", "position": {"x": 2800, "y": 6400}},
                    {"type": "WARD_PLACED", "timestamp": 95000, "creatorId": 1,
                     "wardType": "YELLOW_TRINKET"}
                ]},
                {"timestamp": 60000, "events": [
                    {"type": "WARD_KILL", "timestamp": 120000, "killerId": 1,
                     "wardType": "TEEMO_MUSHROOM", "position": {"x": 2800, "y": 6400}},
                    {"type": "ELITE_MONSTER_KILL", "timestamp": 130000, "killerId": 2,
                     "monsterType": "DRAGON", "position": {"x": 9866, "y": 4414}},
                    {"type": "BUILDING_KILL", "timestamp": 140000, "killerId": 9,
                     "buildingType": "TOWER_BUILDING"},
                    {"type": "CHAMPION_KILL", "timestamp": 150000, "killerId": 1,
                     "victimId": 2, "position": {"x": 100, "y": 100}}
                ]}
            ]
        }
    }"#;

    fn detail() -> MatchDetail {
        serde_json::from_str::<RawMatch>(MATCH_JSON).unwrap().into()
    }

    #[test]
    fn test_match_conversion() {
        let detail = detail();

        assert_eq!(detail.match_id.as_str(), "JP1_42");
        assert_eq!(detail.map_id, 11);
        assert_eq!(detail.participants.len(), 2);

        let first = &detail.participants[0];
        assert_eq!(first.summoner_name, "ezToWin");
        assert_eq!(first.total_cs(), 300);
        assert_eq!(detail.participants[1].team_id, TeamId::Red);
        assert_eq!(detail.participants[1].vision_score, 0);
    }

    #[test]
    fn test_timeline_translation() {
        let raw: RawTimeline = serde_json::from_str(TIMELINE_JSON).unwrap();
        let timeline = into_timeline(raw, &detail());

        assert_eq!(timeline.game_duration, 1_800_000);
        assert_eq!(timeline.participants[1].participant_id, 2);
        assert_eq!(timeline.participants[1].team_id, TeamId::Red);

        let kinds: Vec<&str> = timeline.events.iter().map(|e| e.kind_name()).collect();
        assert_eq!(
            kinds,
            vec![
                "WARD_PLACED",
                "WARD_KILL",
                "ELITE_MONSTER_KILL",
                "BUILDING_KILL",
                "CHAMPION_KILL"
            ]
        );

        let placed = timeline.events[0].as_ward().unwrap();
        assert_eq!(placed.ward_type, WardType::YellowTrinket);
        assert_eq!(placed.team_id, TeamId::Red);
        assert_eq!(placed.participant_id, 2);

        let killed = timeline.events[1].as_ward().unwrap();
        assert_eq!(killed.ward_type, WardType::Unknown);
        assert_eq!(killed.team_id, TeamId::Blue);
        assert_eq!(killed.killer_id, Some(1));

        // Unknown participant 9 falls back to the blue side.
        assert_eq!(timeline.events[2].team_id(), TeamId::Red);
        assert_eq!(timeline.events[3].team_id(), TeamId::Blue);
    }

    #[test]
    fn test_summoner_prefers_riot_id() {
        let summoner: RawSummoner = serde_json::from_str(
            r#"{"puuid": "p", "profileIconId": 1, "summonerLevel": 30, "revisionDate": 5}"#,
        )
        .unwrap();
        let account = RawAccount {
            puuid: "p".to_string(),
            game_name: Some("ezToWin".to_string()),
            tag_line: Some("LOL".to_string()),
        };

        let resolved = summoner.clone().into_summoner(Some(&account));
        assert_eq!(resolved.name, "ezToWin");
        assert_eq!(resolved.tag_line.as_deref(), Some("LOL"));

        let legacy = summoner.into_summoner(None);
        assert_eq!(legacy.name, "");
        assert_eq!(legacy.tag_line, None);
    }
}
