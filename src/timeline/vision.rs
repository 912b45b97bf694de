//! Point-in-time ward reconstruction for the vision overlay.
//!
//! The upstream data carries no ward identity, so wards are correlated by
//! exact position: a kill removes whatever ward sits at its coordinates, and a
//! new placement at an occupied spot replaces the ward there.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::calculate::round2;
use crate::map::{Importance, KeyArea, MapBounds, MapPercent, WorldPoint};
use crate::models::{GameEvent, Position, TeamId, WardCategory, WardEvent, WardType};

/// A ward on the map at a given time.
///
/// Identified by `(position, placed_at)`; rebuilt whenever the time cursor
/// moves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveWard {
    pub position: Position,
    pub ward_type: WardType,
    pub category: WardCategory,
    pub team_id: TeamId,
    pub placed_at: u64,
    /// `None` for wards that only leave the map when killed.
    pub expires_at: Option<u64>,
    pub participant_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<u32>,
}

impl ActiveWard {
    fn from_placement(event: &WardEvent) -> Self {
        Self {
            position: event.position,
            ward_type: event.ward_type,
            category: event.ward_type.category(),
            team_id: event.team_id,
            placed_at: event.timestamp,
            expires_at: event
                .ward_type
                .lifetime_ms()
                .map(|life| event.timestamp.saturating_add(life)),
            participant_id: event.participant_id,
            creator_id: event.creator_id,
        }
    }

    pub fn key(&self) -> (Position, u64) {
        (self.position, self.placed_at)
    }

    /// A timed ward is gone once `t` reaches its expiry.
    pub fn is_expired_at(&self, t: u64) -> bool {
        self.expires_at.is_some_and(|expiry| t >= expiry)
    }
}

enum WardAction<'a> {
    Place(&'a WardEvent),
    Remove(Position),
}

fn ward_action(event: &GameEvent) -> Option<WardAction<'_>> {
    match event {
        GameEvent::WardPlaced(w) => Some(WardAction::Place(w)),
        GameEvent::WardKill(w) | GameEvent::WardExpired(w) => Some(WardAction::Remove(w.position)),
        _ => None,
    }
}

/// Ward events with `lower < timestamp <= upper`, stably sorted by time.
fn ward_events_between(events: &[GameEvent], lower: Option<u64>, upper: u64) -> Vec<&GameEvent> {
    let mut selected: Vec<&GameEvent> = events
        .iter()
        .filter(|e| e.is_ward())
        .filter(|e| e.timestamp() <= upper && lower.map_or(true, |l| e.timestamp() > l))
        .collect();
    selected.sort_by_key(|e| e.timestamp());
    selected
}

fn sorted_wards(mut wards: Vec<ActiveWard>) -> Vec<ActiveWard> {
    wards.sort_by_key(|w| (w.placed_at, w.position.x, w.position.y));
    wards
}

/// Replay all ward events up to and including `t` and return the wards on the
/// map at `t`, ordered by placement time.
///
/// Placements already expired at `t` are skipped without displacing the ward
/// at their spot; kills and expiry events clear the spot.
pub fn active_wards_at(events: &[GameEvent], t: u64) -> Vec<ActiveWard> {
    let mut by_position: HashMap<Position, ActiveWard> = HashMap::new();

    for event in ward_events_between(events, None, t) {
        match ward_action(event) {
            Some(WardAction::Place(placed)) => {
                let ward = ActiveWard::from_placement(placed);
                if ward.is_expired_at(t) {
                    continue;
                }
                by_position.insert(ward.position, ward);
            }
            Some(WardAction::Remove(position)) => {
                by_position.remove(&position);
            }
            None => {}
        }
    }

    sorted_wards(by_position.into_values().collect())
}

/// Incremental form of [`active_wards_at`] for a cursor that mostly moves
/// forward (playback).
///
/// Each spot keeps every placement since its last kill, because a newer
/// placement that times out can uncover an older untimed one. Moving the cursor
/// backwards replays from the start.
#[derive(Debug, Default, Clone)]
pub struct VisionReplay {
    cursor: Option<u64>,
    slots: HashMap<Position, Vec<ActiveWard>>,
}

impl VisionReplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Option<u64> {
        self.cursor
    }

    pub fn advance_to(&mut self, events: &[GameEvent], t: u64) {
        if self.cursor.is_some_and(|c| t < c) {
            *self = Self::default();
        }

        for event in ward_events_between(events, self.cursor, t) {
            match ward_action(event) {
                Some(WardAction::Place(placed)) => {
                    let ward = ActiveWard::from_placement(placed);
                    self.slots.entry(ward.position).or_default().push(ward);
                }
                Some(WardAction::Remove(position)) => {
                    self.slots.remove(&position);
                }
                None => {}
            }
        }

        // Expiry is permanent as the cursor only grows from here.
        self.slots.retain(|_, slot| {
            slot.retain(|w| !w.is_expired_at(t));
            !slot.is_empty()
        });
        self.cursor = Some(t);
    }

    pub fn active(&self) -> Vec<ActiveWard> {
        sorted_wards(
            self.slots
                .values()
                .filter_map(|slot| slot.last().cloned())
                .collect(),
        )
    }
}

/// Display filter applied after reconstruction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WardFilter {
    pub team: Option<TeamId>,
    pub categories: Option<Vec<WardCategory>>,
}

impl WardFilter {
    pub fn matches(&self, ward: &ActiveWard) -> bool {
        self.team.map_or(true, |team| ward.team_id == team)
            && self
                .categories
                .as_ref()
                .map_or(true, |cats| cats.contains(&ward.category))
    }

    pub fn apply(&self, wards: Vec<ActiveWard>) -> Vec<ActiveWard> {
        wards.into_iter().filter(|w| self.matches(w)).collect()
    }
}

/// An active ward positioned on the overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWard {
    #[serde(flatten)]
    pub ward: ActiveWard,
    pub map_position: MapPercent,
}

pub fn place_on_map(wards: Vec<ActiveWard>, bounds: &MapBounds) -> Vec<PlacedWard> {
    wards
        .into_iter()
        .map(|ward| PlacedWard {
            map_position: bounds.to_percent(WorldPoint::from(ward.position)),
            ward,
        })
        .collect()
}

/// Control wards a team is expected to keep on the map.
pub const CONTROL_WARD_TARGET: u32 = 2;

/// Aggregate view of the wards being displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisionSummary {
    pub total_wards: u32,
    pub by_category: BTreeMap<WardCategory, u32>,
    pub key_areas_covered: Vec<&'static str>,
    /// Percentage of key areas covered, weighted by importance.
    pub map_coverage: f64,
    /// 0-100 blend of coverage and control ward upkeep.
    pub efficiency: f64,
    /// Scoreboard vision score of the player the view was requested for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision_score: Option<u32>,
    pub suggestions: Vec<String>,
}

pub fn summarize(wards: &[PlacedWard], key_areas: &[KeyArea]) -> VisionSummary {
    let mut by_category = BTreeMap::new();
    for placed in wards {
        *by_category.entry(placed.ward.category).or_insert(0) += 1;
    }

    let (covered, uncovered): (Vec<&KeyArea>, Vec<&KeyArea>) = key_areas
        .iter()
        .partition(|area| wards.iter().any(|w| area.contains(w.map_position)));

    let total_weight: f64 = key_areas.iter().map(|a| a.importance.weight()).sum();
    let covered_weight: f64 = covered.iter().map(|a| a.importance.weight()).sum();
    let coverage = if total_weight > 0.0 {
        covered_weight / total_weight * 100.0
    } else {
        0.0
    };

    let control = by_category
        .get(&WardCategory::Control)
        .copied()
        .unwrap_or(0);
    let upkeep = f64::from(control.min(CONTROL_WARD_TARGET)) / f64::from(CONTROL_WARD_TARGET);
    let efficiency = if wards.is_empty() {
        0.0
    } else {
        0.7 * coverage + 30.0 * upkeep
    };

    let mut suggestions: Vec<String> = uncovered
        .iter()
        .filter(|area| area.importance != Importance::Low)
        .map(|area| format!("No vision on {}", area.name))
        .collect();
    if control < CONTROL_WARD_TARGET {
        suggestions.push(format!(
            "{} control ward(s) on the map, keep at least {}",
            control, CONTROL_WARD_TARGET
        ));
    }
    if suggestions.is_empty() {
        suggestions.push("Vision covers every key objective".to_string());
    }

    VisionSummary {
        total_wards: wards.len() as u32,
        by_category,
        key_areas_covered: covered.iter().map(|area| area.name).collect(),
        map_coverage: round2(coverage),
        efficiency: round2(efficiency),
        vision_score: None,
        suggestions,
    }
}
