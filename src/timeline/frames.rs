//! Fixed-width time bucketing of timeline events.

use std::num::NonZeroU64;

use serde::Serialize;

use crate::models::GameEvent;

/// Width of one frame: one minute of game time.
pub const FRAME_INTERVAL_MS: u64 = 60_000;

/// All events whose timestamp falls in `[timestamp, timestamp + width)`.
///
/// Frames borrow from the event list and are rebuilt on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame<'a> {
    pub timestamp: u64,
    pub events: Vec<&'a GameEvent>,
}

/// Bucket events into one-minute frames covering `0..=duration_ms`.
pub fn bucket_events(events: &[GameEvent], duration_ms: u64) -> Vec<Frame<'_>> {
    bucket_events_with_width(events, duration_ms, frame_width())
}

/// Bucket events into frames of `width` milliseconds.
///
/// Frame starts are `0, W, 2W, ...` up to the last multiple of `W` not greater
/// than `duration_ms`, so a zero duration still yields one frame. Each event
/// lands in frame `timestamp / W`; within a frame the input order is kept.
/// Events past the end of the last frame belong to no frame.
pub fn bucket_events_with_width(
    events: &[GameEvent],
    duration_ms: u64,
    width: NonZeroU64,
) -> Vec<Frame<'_>> {
    let width = width.get();
    let frame_count = (duration_ms / width + 1) as usize;

    let mut frames: Vec<Frame<'_>> = (0..frame_count as u64)
        .map(|i| Frame {
            timestamp: i * width,
            events: Vec::new(),
        })
        .collect();

    for event in events {
        let index = (event.timestamp() / width) as usize;
        if let Some(frame) = frames.get_mut(index) {
            frame.events.push(event);
        }
    }

    frames
}

/// Like [`bucket_events`], but inside each frame all ward events come first
/// and objective events after them, each group in input order.
pub fn bucket_wards_then_objectives(events: &[GameEvent], duration_ms: u64) -> Vec<Frame<'_>> {
    let mut frames = bucket_events(events, duration_ms);
    for frame in &mut frames {
        // Stable sort: relative order within each group survives.
        frame.events.sort_by_key(|e| !e.is_ward());
    }
    frames
}

fn frame_width() -> NonZeroU64 {
    NonZeroU64::new(FRAME_INTERVAL_MS).unwrap_or(NonZeroU64::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ObjectiveEvent, Position, TeamId, WardEvent, WardType};

    fn ward_at(timestamp: u64, x: i32) -> GameEvent {
        GameEvent::WardPlaced(WardEvent {
            timestamp,
            position: Position::new(x, x),
            ward_type: WardType::YellowTrinket,
            team_id: TeamId::Blue,
            participant_id: 1,
            creator_id: None,
            killer_id: None,
        })
    }

    fn dragon_at(timestamp: u64) -> GameEvent {
        GameEvent::EliteMonsterKill(ObjectiveEvent {
            timestamp,
            position: None,
            monster_type: Some("DRAGON".to_string()),
            building_type: None,
            team_id: TeamId::Red,
            participant_id: None,
        })
    }

    fn width(ms: u64) -> NonZeroU64 {
        NonZeroU64::new(ms).unwrap()
    }

    #[test]
    fn test_frame_starts_cover_duration() {
        let frames = bucket_events(&[], 2_100_000);
        assert_eq!(frames.len(), 36);
        assert_eq!(frames[0].timestamp, 0);
        assert_eq!(frames[35].timestamp, 2_100_000);
        assert!(frames.iter().all(|f| f.events.is_empty()));
    }

    #[test]
    fn test_duration_not_multiple_of_width() {
        let frames = bucket_events(&[], 150_000);
        let starts: Vec<u64> = frames.iter().map(|f| f.timestamp).collect();
        assert_eq!(starts, vec![0, 60_000, 120_000]);
    }

    #[test]
    fn test_zero_duration_yields_one_frame() {
        let events = vec![ward_at(0, 1)];
        let frames = bucket_events(&events, 0);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].events.len(), 1);
    }

    #[test]
    fn test_boundaries_are_half_open() {
        let events = vec![ward_at(59_999, 1), ward_at(60_000, 2), ward_at(119_999, 3)];
        let frames = bucket_events(&events, 120_000);

        assert_eq!(frames[0].events, vec![&events[0]]);
        assert_eq!(frames[1].events, vec![&events[1], &events[2]]);
        assert!(frames[2].events.is_empty());
    }

    #[test]
    fn test_every_event_in_exactly_one_frame() {
        let events: Vec<GameEvent> = (0..50u64)
            .map(|i| ward_at((i * 37_123) % 600_000, i as i32))
            .collect();

        for w in [1_000, 7_000, 60_000, 600_000] {
            let frames = bucket_events_with_width(&events, 600_000, width(w));
            let total: usize = frames.iter().map(|f| f.events.len()).sum();
            assert_eq!(total, events.len(), "width {}", w);

            for (i, frame) in frames.iter().enumerate() {
                assert_eq!(frame.timestamp, i as u64 * w);
                for e in &frame.events {
                    assert!(e.timestamp() >= frame.timestamp);
                    assert!(e.timestamp() < frame.timestamp + w);
                }
            }
        }
    }

    #[test]
    fn test_input_order_preserved_not_sorted() {
        let events = vec![ward_at(30_000, 1), ward_at(10_000, 2), ward_at(20_000, 3)];
        let frames = bucket_events(&events, 60_000);
        assert_eq!(
            frames[0].events,
            vec![&events[0], &events[1], &events[2]]
        );
    }

    #[test]
    fn test_events_past_duration_are_dropped() {
        let events = vec![ward_at(130_000, 1)];
        let frames = bucket_events(&events, 60_000);
        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(|f| f.events.is_empty()));
    }

    #[test]
    fn test_wards_then_objectives() {
        let events = vec![dragon_at(5_000), ward_at(10_000, 1), dragon_at(1_000), ward_at(2_000, 2)];
        let frames = bucket_wards_then_objectives(&events, 0);
        assert_eq!(
            frames[0].events,
            vec![&events[1], &events[3], &events[0], &events[2]]
        );
    }

    #[test]
    fn test_input_untouched() {
        let events = vec![ward_at(1, 1), dragon_at(2)];
        let before = events.clone();
        let _ = bucket_events(&events, 60_000);
        assert_eq!(events, before);
    }
}
