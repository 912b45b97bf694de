//! Platform regions and the regional routing clusters they belong to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regional routing cluster used by account and match endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionalRoute {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl RegionalRoute {
    pub fn host(&self) -> &'static str {
        match self {
            RegionalRoute::Americas => "americas",
            RegionalRoute::Asia => "asia",
            RegionalRoute::Europe => "europe",
            RegionalRoute::Sea => "sea",
        }
    }
}

impl fmt::Display for RegionalRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host())
    }
}

/// A platform region such as `jp1` or `euw1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    Jp1,
    Kr,
    Na1,
    Br1,
    La1,
    La2,
    Euw1,
    Eun1,
    Tr1,
    Ru,
    Oc1,
    Ph2,
    Sg2,
    Th2,
    Tw2,
    Vn2,
}

impl Region {
    pub const ALL: [Region; 16] = [
        Region::Jp1,
        Region::Kr,
        Region::Na1,
        Region::Br1,
        Region::La1,
        Region::La2,
        Region::Euw1,
        Region::Eun1,
        Region::Tr1,
        Region::Ru,
        Region::Oc1,
        Region::Ph2,
        Region::Sg2,
        Region::Th2,
        Region::Tw2,
        Region::Vn2,
    ];

    /// Platform host prefix (`jp1`, `euw1`, ...).
    pub fn platform(&self) -> &'static str {
        match self {
            Region::Jp1 => "jp1",
            Region::Kr => "kr",
            Region::Na1 => "na1",
            Region::Br1 => "br1",
            Region::La1 => "la1",
            Region::La2 => "la2",
            Region::Euw1 => "euw1",
            Region::Eun1 => "eun1",
            Region::Tr1 => "tr1",
            Region::Ru => "ru",
            Region::Oc1 => "oc1",
            Region::Ph2 => "ph2",
            Region::Sg2 => "sg2",
            Region::Th2 => "th2",
            Region::Tw2 => "tw2",
            Region::Vn2 => "vn2",
        }
    }

    pub fn regional_route(&self) -> RegionalRoute {
        match self {
            Region::Jp1 | Region::Kr => RegionalRoute::Asia,
            Region::Na1 | Region::Br1 | Region::La1 | Region::La2 => RegionalRoute::Americas,
            Region::Euw1 | Region::Eun1 | Region::Tr1 | Region::Ru => RegionalRoute::Europe,
            Region::Oc1 | Region::Ph2 | Region::Sg2 | Region::Th2 | Region::Tw2 | Region::Vn2 => {
                RegionalRoute::Sea
            }
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.platform())
    }
}

/// Returned when a region code is not one of the known platforms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported region: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.platform() == lower)
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

impl TryFrom<String> for Region {
    type Error = UnknownRegion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.platform().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parse_case_insensitive() {
        assert_eq!("JP1".parse::<Region>().unwrap(), Region::Jp1);
        assert_eq!(" euw1 ".parse::<Region>().unwrap(), Region::Euw1);
    }

    #[test]
    fn test_region_parse_unknown() {
        let err = "moon1".parse::<Region>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported region: moon1");
    }

    #[test]
    fn test_regional_routes() {
        assert_eq!(Region::Jp1.regional_route(), RegionalRoute::Asia);
        assert_eq!(Region::Kr.regional_route(), RegionalRoute::Asia);
        assert_eq!(Region::Na1.regional_route(), RegionalRoute::Americas);
        assert_eq!(Region::La2.regional_route(), RegionalRoute::Americas);
        assert_eq!(Region::Tr1.regional_route(), RegionalRoute::Europe);
        assert_eq!(Region::Oc1.regional_route(), RegionalRoute::Sea);
        assert_eq!(Region::Vn2.regional_route(), RegionalRoute::Sea);
    }

    #[test]
    fn test_every_region_round_trips_through_its_platform_code() {
        for region in Region::ALL {
            assert_eq!(region.platform().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn test_region_serde() {
        let json = serde_json::to_string(&Region::Eun1).unwrap();
        assert_eq!(json, "\"eun1\"");
        let parsed: Region = serde_json::from_str("\"KR\"").unwrap();
        assert_eq!(parsed, Region::Kr);
        assert!(serde_json::from_str::<Region>("\"xx\"").is_err());
    }
}
