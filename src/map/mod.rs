//! Static map table and the game-world ↔ overlay coordinate transform.
//!
//! Overlay coordinates are percentages (0–100 on each axis) of the map image,
//! so markers can be placed with CSS `left`/`top` regardless of image size.

use serde::Serialize;

use crate::models::Position;

/// A point in game-world units, possibly fractional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Position> for WorldPoint {
    fn from(p: Position) -> Self {
        Self {
            x: p.x as f64,
            y: p.y as f64,
        }
    }
}

/// A point on the overlay, each axis in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPercent {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned game-world extent of a map.
///
/// `min` must be strictly less than `max` on both axes; degenerate bounds are
/// a configuration error and are not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub min: WorldPoint,
    pub max: WorldPoint,
}

impl MapBounds {
    pub const fn new(min: WorldPoint, max: WorldPoint) -> Self {
        Self { min, max }
    }

    /// Clamp a point into the bounds, per axis.
    pub fn clamp(&self, p: WorldPoint) -> WorldPoint {
        WorldPoint {
            x: p.x.clamp(self.min.x, self.max.x),
            y: p.y.clamp(self.min.y, self.max.y),
        }
    }

    /// Clamp then rescale each axis linearly onto `[0, 100]`.
    pub fn to_percent(&self, p: WorldPoint) -> MapPercent {
        let c = self.clamp(p);
        MapPercent {
            x: (c.x - self.min.x) / (self.max.x - self.min.x) * 100.0,
            y: (c.y - self.min.y) / (self.max.y - self.min.y) * 100.0,
        }
    }

    /// Inverse of [`MapBounds::to_percent`] for in-range input.
    pub fn to_world(&self, p: MapPercent) -> WorldPoint {
        WorldPoint {
            x: self.min.x + p.x / 100.0 * (self.max.x - self.min.x),
            y: self.min.y + p.y / 100.0 * (self.max.y - self.min.y),
        }
    }
}

/// Static description of a playable map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapConfig {
    pub map_id: u32,
    pub map_name: &'static str,
    pub bounds: MapBounds,
}

pub const SUMMONERS_RIFT: u32 = 11;

/// Maps with known bounds.
pub const MAP_CONFIGS: [MapConfig; 3] = [
    MapConfig {
        map_id: 11,
        map_name: "Summoner's Rift",
        bounds: MapBounds::new(
            WorldPoint::new(-120.0, -120.0),
            WorldPoint::new(14870.0, 14980.0),
        ),
    },
    MapConfig {
        map_id: 12,
        map_name: "Howling Abyss",
        bounds: MapBounds::new(
            WorldPoint::new(-28.0, -19.0),
            WorldPoint::new(12849.0, 12858.0),
        ),
    },
    MapConfig {
        map_id: 10,
        map_name: "Twisted Treeline",
        bounds: MapBounds::new(WorldPoint::new(0.0, 0.0), WorldPoint::new(15398.0, 15398.0)),
    },
];

pub fn map_config(map_id: u32) -> Option<&'static MapConfig> {
    MAP_CONFIGS.iter().find(|m| m.map_id == map_id)
}

/// Map configuration plus the image to draw it with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapInfo {
    pub map_id: u32,
    pub map_name: String,
    pub image_url: String,
    pub bounds: MapBounds,
}

impl MapInfo {
    pub fn new(config: &MapConfig, ddragon_version: &str) -> Self {
        Self {
            map_id: config.map_id,
            map_name: config.map_name.to_string(),
            image_url: map_image_url(config.map_id, ddragon_version),
            bounds: config.bounds,
        }
    }
}

pub fn map_image_url(map_id: u32, version: &str) -> String {
    format!(
        "https://ddragon.leagueoflegends.com/cdn/{}/img/map/map{}.png",
        version, map_id
    )
}

/// How much a map area matters for vision control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

impl Importance {
    /// Share of map coverage an area carries, relative to the others.
    pub fn weight(self) -> f64 {
        match self {
            Importance::High => 3.0,
            Importance::Medium => 2.0,
            Importance::Low => 1.0,
        }
    }
}

/// A circular area of interest on the overlay, in percentage space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyArea {
    pub name: &'static str,
    pub center: MapPercent,
    /// Diameter as a percentage of the map width.
    pub size: f64,
    pub importance: Importance,
}

impl KeyArea {
    pub fn contains(&self, p: MapPercent) -> bool {
        let (dx, dy) = (p.x - self.center.x, p.y - self.center.y);
        let radius = self.size / 2.0;
        dx * dx + dy * dy <= radius * radius
    }
}

/// Areas of Summoner's Rift that vision analysis looks for.
pub const KEY_AREAS: [KeyArea; 7] = [
    KeyArea {
        name: "Baron Pit",
        center: MapPercent { x: 20.0, y: 20.0 },
        size: 8.0,
        importance: Importance::High,
    },
    KeyArea {
        name: "Dragon Pit",
        center: MapPercent { x: 80.0, y: 80.0 },
        size: 8.0,
        importance: Importance::High,
    },
    KeyArea {
        name: "Mid River",
        center: MapPercent { x: 50.0, y: 40.0 },
        size: 6.0,
        importance: Importance::Medium,
    },
    KeyArea {
        name: "Blue Jungle",
        center: MapPercent { x: 25.0, y: 45.0 },
        size: 10.0,
        importance: Importance::Medium,
    },
    KeyArea {
        name: "Red Jungle",
        center: MapPercent { x: 75.0, y: 55.0 },
        size: 10.0,
        importance: Importance::Medium,
    },
    KeyArea {
        name: "Top Lane Bush",
        center: MapPercent { x: 15.0, y: 30.0 },
        size: 5.0,
        importance: Importance::Low,
    },
    KeyArea {
        name: "Bot Lane Bush",
        center: MapPercent { x: 85.0, y: 70.0 },
        size: 5.0,
        importance: Importance::Low,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn unit_bounds() -> MapBounds {
        MapBounds::new(WorldPoint::new(0.0, 0.0), WorldPoint::new(1000.0, 1000.0))
    }

    #[test]
    fn test_out_of_range_clamps_to_edges() {
        let p = unit_bounds().to_percent(WorldPoint::new(-50.0, 99999.0));
        assert_eq!(p, MapPercent { x: 0.0, y: 100.0 });
    }

    #[test]
    fn test_midpoint() {
        let p = unit_bounds().to_percent(WorldPoint::new(500.0, 250.0));
        assert!((p.x - 50.0).abs() < EPS);
        assert!((p.y - 25.0).abs() < EPS);
    }

    #[test]
    fn test_round_trip_returns_clamped_point() {
        let rift = map_config(SUMMONERS_RIFT).unwrap().bounds;
        let samples = [
            WorldPoint::new(2800.0, 6400.0),
            WorldPoint::new(-500.0, 7000.0),
            WorldPoint::new(20000.0, -20000.0),
            WorldPoint::new(14870.0, 14980.0),
            WorldPoint::new(-120.0, -120.0),
            WorldPoint::new(7432.25, 1.5),
        ];

        for p in samples {
            let back = rift.to_world(rift.to_percent(p));
            let expected = rift.clamp(p);
            assert!((back.x - expected.x).abs() < 1e-6, "{:?} -> {:?}", p, back);
            assert!((back.y - expected.y).abs() < 1e-6, "{:?} -> {:?}", p, back);
        }
    }

    #[test]
    fn test_percent_always_in_display_range() {
        let rift = map_config(SUMMONERS_RIFT).unwrap().bounds;
        for (x, y) in [(-1e9, 1e9), (0.0, 0.0), (14870.0, -120.0), (3e4, 3e4)] {
            let p = rift.to_percent(WorldPoint::new(x, y));
            assert!((0.0..=100.0).contains(&p.x));
            assert!((0.0..=100.0).contains(&p.y));
        }
    }

    #[test]
    fn test_from_position() {
        let p: WorldPoint = Position::new(9866, 4414).into();
        assert_eq!(p, WorldPoint::new(9866.0, 4414.0));
    }

    #[test]
    fn test_map_lookup() {
        assert_eq!(map_config(12).unwrap().map_name, "Howling Abyss");
        assert!(map_config(99).is_none());
    }

    #[test]
    fn test_map_info_image_url() {
        let info = MapInfo::new(map_config(11).unwrap(), "13.24.1");
        assert_eq!(
            info.image_url,
            "https://ddragon.leagueoflegends.com/cdn/13.24.1/img/map/map11.png"
        );
    }

    #[test]
    fn test_key_area_contains() {
        let baron = KEY_AREAS[0];
        assert!(baron.contains(MapPercent { x: 21.0, y: 22.0 }));
        assert!(!baron.contains(MapPercent { x: 30.0, y: 30.0 }));
    }

    #[test]
    fn test_key_area_weights() {
        let total: f64 = KEY_AREAS.iter().map(|a| a.importance.weight()).sum();
        assert_eq!(total, 14.0);
        assert!(Importance::High.weight() > Importance::Medium.weight());
    }
}
