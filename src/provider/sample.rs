//! Built-in sample data served when the live API is not configured or down.

use std::collections::{BTreeMap, HashMap};

use crate::models::{
    GameEvent, MatchDetail, MatchId, MatchTimeline, ObjectiveEvent,
    ParticipantInfo, ParticipantStats, PlayerHandle, Position, Puuid, Summoner, TeamId,
    WardEvent, WardType,
};

use super::ProviderError;

const SAMPLE_GAME_CREATION: i64 = 1_704_000_000_000;
const SAMPLE_TIMELINE_DURATION_MS: u64 = 2_100_000;
const FALLBACK_PUUID: &str = "sample-puuid";

/// Read-only sample players, match histories and match records.
#[derive(Debug, Clone)]
pub struct SampleData {
    /// Keyed by normalized handle.
    players: BTreeMap<String, Summoner>,
    histories: HashMap<Puuid, Vec<MatchId>>,
    matches: HashMap<MatchId, MatchDetail>,
}

struct SamplePlayer {
    key: &'static str,
    name: &'static str,
    tag_line: Option<&'static str>,
    puuid: &'static str,
    profile_icon_id: u32,
    summoner_level: u32,
    match_prefix: &'static str,
    first_match: u64,
}

const SAMPLE_PLAYERS: [SamplePlayer; 7] = [
    SamplePlayer {
        key: "hide on bush",
        name: "Hide on bush",
        tag_line: None,
        puuid: "HsH2xmxhWa8wSgEuCsrMW9-D7Jg5fP3UlXv5jnQ9X8vH2pQ",
        profile_icon_id: 4901,
        summoner_level: 435,
        match_prefix: "KR",
        first_match: 7_200_123_456,
    },
    SamplePlayer {
        key: "faker",
        name: "Faker",
        tag_line: None,
        puuid: "HsH2xmxhWa8wSgEuCsrMW9-D7Jg5fP3UlXv5jnQ9X8vH2pQ",
        profile_icon_id: 5008,
        summoner_level: 450,
        match_prefix: "KR",
        first_match: 7_200_123_456,
    },
    SamplePlayer {
        key: "caps",
        name: "Caps",
        tag_line: None,
        puuid: "caps-puuid-123",
        profile_icon_id: 4932,
        summoner_level: 380,
        match_prefix: "EUW1",
        first_match: 6_500_123_456,
    },
    SamplePlayer {
        key: "showmaker",
        name: "Showmaker",
        tag_line: None,
        puuid: "showmaker-puuid-123",
        profile_icon_id: 4873,
        summoner_level: 420,
        match_prefix: "KR",
        first_match: 7_200_234_567,
    },
    SamplePlayer {
        key: "eztowin#lol",
        name: "ezToWin",
        tag_line: Some("LOL"),
        puuid: "eztowin-puuid-456",
        profile_icon_id: 4567,
        summoner_level: 325,
        match_prefix: "JP1",
        first_match: 5_800_123_456,
    },
    SamplePlayer {
        key: "testplayer#kr1",
        name: "TestPlayer",
        tag_line: Some("KR1"),
        puuid: "testplayer-puuid-789",
        profile_icon_id: 4123,
        summoner_level: 280,
        match_prefix: "KR",
        first_match: 7_200_345_678,
    },
    SamplePlayer {
        key: "proplayer#main",
        name: "ProPlayer",
        tag_line: Some("MAIN"),
        puuid: "proplayer-puuid-101",
        profile_icon_id: 4890,
        summoner_level: 450,
        match_prefix: "KR",
        first_match: 7_200_456_789,
    },
];

/// (champion id, champion, kills, deaths, assists, minions, neutral, gold,
/// damage, vision, wards placed, wards killed, duration s, creation offset)
type CannedLine = (u32, &'static str, u32, u32, u32, u32, u32, u32, u32, u32, u32, u32, u64, i64);

const FEATURED_MATCHES: [(&str, CannedLine); 5] = [
    ("KR_7200123456", (7, "LeBlanc", 8, 2, 12, 245, 15, 16_800, 28_500, 32, 18, 8, 1850, 0)),
    ("KR_7200123457", (157, "Yasuo", 12, 4, 8, 278, 22, 18_200, 32_100, 28, 14, 6, 2120, 50_000_000)),
    ("KR_7200123458", (91, "Talon", 15, 3, 9, 198, 45, 17_500, 29_800, 25, 12, 9, 1680, 100_000_000)),
    ("KR_7200123459", (103, "Ahri", 6, 1, 14, 267, 8, 15_900, 26_400, 35, 21, 12, 1920, 150_000_000)),
    ("KR_7200123460", (134, "Syndra", 9, 2, 11, 289, 12, 17_800, 31_200, 29, 16, 7, 2250, 200_000_000)),
];

const FILLER_CHAMPIONS: [(u32, &str); 6] = [
    (157, "Yasuo"),
    (222, "Jinx"),
    (412, "Thresh"),
    (64, "Lee Sin"),
    (103, "Ahri"),
    (238, "Zed"),
];

impl SampleData {
    pub fn builtin() -> Self {
        let mut players = BTreeMap::new();
        let mut histories = HashMap::new();

        for p in &SAMPLE_PLAYERS {
            let puuid = Puuid::from(p.puuid);
            players.insert(
                p.key.to_string(),
                Summoner {
                    puuid: puuid.clone(),
                    name: p.name.to_string(),
                    tag_line: p.tag_line.map(str::to_string),
                    profile_icon_id: p.profile_icon_id,
                    summoner_level: p.summoner_level,
                    revision_date: SAMPLE_GAME_CREATION,
                },
            );
            histories.entry(puuid).or_insert_with(|| {
                (0..5)
                    .map(|i| MatchId::new(format!("{}_{}", p.match_prefix, p.first_match + i)))
                    .collect()
            });
        }

        let featured = &SAMPLE_PLAYERS[0];
        let matches = FEATURED_MATCHES
            .iter()
            .map(|(id, line)| {
                let detail = canned_match(MatchId::from(*id), featured, *line);
                (detail.match_id.clone(), detail)
            })
            .collect();

        Self {
            players,
            histories,
            matches,
        }
    }

    /// Handles that resolve against the sample set.
    pub fn player_names(&self) -> Vec<String> {
        self.players.keys().cloned().collect()
    }

    pub fn player(&self, handle: &PlayerHandle) -> Result<&Summoner, ProviderError> {
        self.players
            .get(&handle.normalized())
            .ok_or_else(|| ProviderError::NotFound {
                message: format!("Summoner '{}' not found in sample data", handle),
                suggestions: self.player_names(),
            })
    }

    /// Match history for a sample player.
    ///
    /// Anyone else (a player resolved live before the live source dropped out)
    /// gets the featured matches, so a history is never empty.
    pub fn match_ids(&self, puuid: &Puuid, count: usize) -> Vec<MatchId> {
        match self.histories.get(puuid) {
            Some(ids) => ids.iter().take(count).cloned().collect(),
            None => FEATURED_MATCHES
                .iter()
                .take(count)
                .map(|(id, _)| MatchId::from(*id))
                .collect(),
        }
    }

    /// The canned record for `match_id`, or a generated one.
    ///
    /// Generated records are derived from the id alone, so repeated requests
    /// agree. Every sample player whose history lists the id takes part.
    pub fn match_detail(&self, match_id: &MatchId) -> MatchDetail {
        if let Some(detail) = self.matches.get(match_id) {
            return detail.clone();
        }

        let seed = seed_of(match_id);
        let mut owners: Vec<(&Puuid, &str)> = Vec::new();
        for summoner in self.players.values() {
            let listed = self
                .histories
                .get(&summoner.puuid)
                .is_some_and(|ids| ids.contains(match_id));
            if listed && !owners.iter().any(|(p, _)| *p == &summoner.puuid) {
                owners.push((&summoner.puuid, summoner.name.as_str()));
            }
        }

        let participants = if owners.is_empty() {
            vec![filler_participant(&Puuid::from(FALLBACK_PUUID), "SamplePlayer", seed)]
        } else {
            owners
                .into_iter()
                .map(|(puuid, name)| filler_participant(puuid, name, seed))
                .collect()
        };

        MatchDetail {
            match_id: match_id.clone(),
            map_id: 11,
            game_creation: SAMPLE_GAME_CREATION - (seed % 1000) as i64 * 60_000,
            game_duration: 1500 + seed % 900,
            game_mode: "CLASSIC".to_string(),
            game_type: "MATCHED_GAME".to_string(),
            participants,
        }
    }

    /// Like [`SampleData::match_detail`], with `puuid` guaranteed to take part.
    ///
    /// A player missing from the record gets a generated stat line, taking the
    /// place of the anonymous filler when there is one.
    pub fn match_detail_for(&self, match_id: &MatchId, puuid: &Puuid) -> MatchDetail {
        let mut detail = self.match_detail(match_id);
        if detail.participant(puuid).is_some() {
            return detail;
        }

        let stand_in = filler_participant(puuid, "SamplePlayer", seed_of(match_id));
        match detail
            .participants
            .iter_mut()
            .find(|p| p.puuid.as_str() == FALLBACK_PUUID)
        {
            Some(slot) => *slot = stand_in,
            None => detail.participants.push(stand_in),
        }
        detail
    }

    /// The synthetic 35-minute Summoner's Rift timeline, labelled with
    /// `match_id`.
    pub fn timeline_for(&self, match_id: &MatchId) -> MatchTimeline {
        MatchTimeline {
            match_id: match_id.clone(),
            map_id: 11,
            game_duration: SAMPLE_TIMELINE_DURATION_MS,
            events: sample_events(),
            participants: sample_participants(),
        }
    }
}

fn canned_match(match_id: MatchId, player: &SamplePlayer, line: CannedLine) -> MatchDetail {
    let (champion_id, champion, k, d, a, cs, neutral, gold, dmg, vision, placed, killed, secs, offset) =
        line;
    MatchDetail {
        match_id,
        map_id: 11,
        game_creation: SAMPLE_GAME_CREATION - offset,
        game_duration: secs,
        game_mode: "CLASSIC".to_string(),
        game_type: "MATCHED_GAME".to_string(),
        participants: vec![ParticipantStats {
            puuid: Puuid::from(player.puuid),
            summoner_name: player.name.to_string(),
            champion_id,
            champion_name: champion.to_string(),
            team_id: TeamId::Blue,
            win: k + a > d * 4,
            kills: k,
            deaths: d,
            assists: a,
            total_minions_killed: cs,
            neutral_minions_killed: neutral,
            gold_earned: gold,
            total_damage_dealt_to_champions: dmg,
            vision_score: vision,
            wards_placed: placed,
            wards_killed: killed,
        }],
    }
}

/// Stable seed from the digits and letters of an id (FNV-1a).
fn seed_of(match_id: &MatchId) -> u64 {
    match_id
        .as_str()
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
            (h ^ b as u64).wrapping_mul(0x0100_0000_01b3)
        })
}

fn filler_participant(puuid: &Puuid, name: &str, seed: u64) -> ParticipantStats {
    let (champion_id, champion) = FILLER_CHAMPIONS[(seed % FILLER_CHAMPIONS.len() as u64) as usize];
    let pick = |shift: u32, modulo: u64| ((seed >> shift) % modulo) as u32;

    ParticipantStats {
        puuid: puuid.clone(),
        summoner_name: name.to_string(),
        champion_id,
        champion_name: champion.to_string(),
        team_id: TeamId::Blue,
        win: seed % 2 == 0,
        kills: 2 + pick(3, 10),
        deaths: 1 + pick(7, 6),
        assists: 3 + pick(11, 12),
        total_minions_killed: 150 + pick(15, 120),
        neutral_minions_killed: pick(19, 40),
        gold_earned: 9_000 + pick(23, 6_000),
        total_damage_dealt_to_champions: 12_000 + pick(29, 15_000),
        vision_score: 15 + pick(37, 25),
        wards_placed: 8 + pick(41, 12),
        wards_killed: 2 + pick(45, 8),
    }
}

fn placed(
    timestamp: u64,
    x: i32,
    y: i32,
    ward_type: WardType,
    participant_id: u32,
    team_id: TeamId,
) -> GameEvent {
    GameEvent::WardPlaced(WardEvent {
        timestamp,
        position: Position::new(x, y),
        ward_type,
        team_id,
        participant_id,
        creator_id: Some(participant_id),
        killer_id: None,
    })
}

fn monster(
    timestamp: u64,
    x: i32,
    y: i32,
    monster_type: &str,
    participant_id: u32,
    team_id: TeamId,
) -> GameEvent {
    GameEvent::EliteMonsterKill(ObjectiveEvent {
        timestamp,
        position: Some(Position::new(x, y)),
        monster_type: Some(monster_type.to_string()),
        building_type: None,
        team_id,
        participant_id: Some(participant_id),
    })
}

fn sample_events() -> Vec<GameEvent> {
    use TeamId::{Blue, Red};
    use WardType::{BlueTrinket, ControlWard, YellowTrinket};

    vec![
        placed(90_000, 2800, 6400, YellowTrinket, 1, Blue),
        placed(180_000, 9800, 3200, ControlWard, 2, Blue),
        placed(240_000, 7400, 11200, YellowTrinket, 6, Red),
        placed(600_000, 4900, 6600, ControlWard, 1, Blue),
        GameEvent::WardKill(WardEvent {
            timestamp: 660_000,
            position: Position::new(9800, 3200),
            ward_type: ControlWard,
            team_id: Red,
            participant_id: 7,
            creator_id: None,
            killer_id: Some(7),
        }),
        placed(720_000, 11200, 7800, BlueTrinket, 5, Blue),
        placed(1_200_000, 3200, 9800, ControlWard, 2, Blue),
        placed(1_260_000, 12800, 4200, YellowTrinket, 8, Red),
        GameEvent::WardExpired(WardEvent {
            timestamp: 1_320_000,
            position: Position::new(2800, 6400),
            ward_type: YellowTrinket,
            team_id: Blue,
            participant_id: 1,
            creator_id: None,
            killer_id: None,
        }),
        monster(300_000, 9866, 4414, "DRAGON", 1, Blue),
        monster(900_000, 4954, 10387, "RIFTHERALD", 6, Red),
        monster(1_500_000, 4954, 10387, "BARON", 3, Blue),
    ]
}

fn sample_participants() -> Vec<ParticipantInfo> {
    let roster = [
        ("Player1", "Yasuo"),
        ("Player2", "Jinx"),
        ("Player3", "Thresh"),
        ("Player4", "Lee Sin"),
        ("Player5", "Ahri"),
        ("Enemy1", "Garen"),
        ("Enemy2", "Ashe"),
        ("Enemy3", "Leona"),
        ("Enemy4", "Graves"),
        ("Enemy5", "Zed"),
    ];

    roster
        .iter()
        .enumerate()
        .map(|(i, (name, champion))| ParticipantInfo {
            participant_id: i as u32 + 1,
            summoner_name: name.to_string(),
            team_id: if i < 5 { TeamId::Blue } else { TeamId::Red },
            champion_name: champion.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::calculate_basic_metrics;

    fn handle(raw: &str) -> PlayerHandle {
        PlayerHandle::parse(raw).unwrap()
    }

    #[test]
    fn test_lookup_ignores_case_and_spacing() {
        let data = SampleData::builtin();
        let summoner = data.player(&handle("  HIDE   on Bush")).unwrap();
        assert_eq!(summoner.name, "Hide on bush");
        assert_eq!(summoner.summoner_level, 435);

        let riot_id = data.player(&handle("ezToWin#LOL")).unwrap();
        assert_eq!(riot_id.tag_line.as_deref(), Some("LOL"));
    }

    #[test]
    fn test_miss_suggests_sample_names() {
        let data = SampleData::builtin();
        match data.player(&handle("Nobody")) {
            Err(ProviderError::NotFound { suggestions, .. }) => {
                assert_eq!(suggestions.len(), 7);
                assert!(suggestions.contains(&"faker".to_string()));
                assert!(suggestions.contains(&"proplayer#main".to_string()));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_histories() {
        let data = SampleData::builtin();
        let faker = data.player(&handle("faker")).unwrap();
        let ids = data.match_ids(&faker.puuid, 20);

        assert_eq!(ids.len(), 5);
        assert_eq!(ids[0].as_str(), "KR_7200123456");
        assert_eq!(ids[4].as_str(), "KR_7200123460");
        assert_eq!(data.match_ids(&faker.puuid, 2).len(), 2);

        let caps = data.player(&handle("caps")).unwrap();
        assert_eq!(data.match_ids(&caps.puuid, 20)[0].as_str(), "EUW1_6500123456");

        let stranger = data.match_ids(&Puuid::from("stranger"), 20);
        assert_eq!(stranger.len(), 5);
        assert_eq!(stranger[0].as_str(), "KR_7200123456");
    }

    #[test]
    fn test_featured_match_metrics() {
        let data = SampleData::builtin();
        let detail = data.match_detail(&MatchId::from("KR_7200123456"));

        assert_eq!(detail.game_duration, 1850);
        let p = &detail.participants[0];
        assert_eq!(p.champion_name, "LeBlanc");

        let metrics = calculate_basic_metrics(p, detail.game_duration);
        assert_eq!(metrics.kda, 10.0);
        assert_eq!(metrics.cs_per_min, 8.43);
    }

    #[test]
    fn test_generated_match_is_deterministic() {
        let data = SampleData::builtin();
        let id = MatchId::from("EUW1_6500123457");

        let first = data.match_detail(&id);
        let second = data.match_detail(&id);
        assert_eq!(first, second);

        let caps = data.player(&handle("caps")).unwrap();
        assert!(first.participant(&caps.puuid).is_some());
        assert!((1500..2400).contains(&first.game_duration));
    }

    #[test]
    fn test_generated_match_for_unknown_id() {
        let data = SampleData::builtin();
        let detail = data.match_detail(&MatchId::from("NA1_1"));
        assert_eq!(detail.participants.len(), 1);
        assert_eq!(detail.participants[0].puuid.as_str(), FALLBACK_PUUID);
    }

    #[test]
    fn test_match_detail_for_adds_missing_player() {
        let data = SampleData::builtin();
        let live = Puuid::from("real-live-puuid");

        let generated = data.match_detail_for(&MatchId::from("JP1_424242"), &live);
        assert_eq!(generated.participants.len(), 1);
        assert!(generated.participant(&live).is_some());

        let featured = data.match_detail_for(&MatchId::from("KR_7200123456"), &live);
        assert_eq!(featured.participants.len(), 2);
        assert_eq!(featured.participants[0].champion_name, "LeBlanc");
        assert!(featured.participant(&live).is_some());

        let again = data.match_detail_for(&MatchId::from("KR_7200123456"), &live);
        assert_eq!(featured, again);
    }

    #[test]
    fn test_match_detail_for_keeps_listed_player() {
        let data = SampleData::builtin();
        let caps = data.player(&handle("caps")).unwrap();
        let id = MatchId::from("EUW1_6500123457");

        assert_eq!(data.match_detail_for(&id, &caps.puuid), data.match_detail(&id));
    }

    #[test]
    fn test_sample_timeline_shape() {
        let timeline = SampleData::builtin().timeline_for(&MatchId::from("JP1_9"));

        assert_eq!(timeline.match_id.as_str(), "JP1_9");
        assert_eq!(timeline.map_id, 11);
        assert_eq!(timeline.game_duration, 2_100_000);
        assert_eq!(timeline.ward_events().count(), 9);
        assert_eq!(timeline.objective_events().count(), 3);
        assert_eq!(timeline.participants.len(), 10);
        assert_eq!(timeline.participants[5].team_id, TeamId::Red);
    }
}
