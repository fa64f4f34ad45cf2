//! The seven playable regions and their identifiers.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A playable continent, identified on the wire by a lowercase hyphenated id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Continent {
    NorthAmerica,
    SouthAmerica,
    Europe,
    Africa,
    Asia,
    Australia,
    Antarctica,
}

/// Raised when a string does not name one of the seven continents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown continent: {0}")]
pub struct UnknownContinent(pub String);

impl Continent {
    pub const ALL: [Self; 7] = [
        Self::NorthAmerica,
        Self::SouthAmerica,
        Self::Europe,
        Self::Africa,
        Self::Asia,
        Self::Australia,
        Self::Antarctica,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::NorthAmerica => "north-america",
            Self::SouthAmerica => "south-america",
            Self::Europe => "europe",
            Self::Africa => "africa",
            Self::Asia => "asia",
            Self::Australia => "australia",
            Self::Antarctica => "antarctica",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::SouthAmerica => "South America",
            Self::Europe => "Europe",
            Self::Africa => "Africa",
            Self::Asia => "Asia",
            Self::Australia => "Australia",
            Self::Antarctica => "Antarctica",
        }
    }

    /// Exclusive upper bound for mock progress values.
    #[must_use]
    pub const fn mock_ceiling(self) -> f64 {
        match self {
            Self::NorthAmerica => 100.0,
            Self::SouthAmerica => 80.0,
            Self::Europe => 90.0,
            Self::Africa => 60.0,
            Self::Asia => 70.0,
            Self::Australia => 95.0,
            Self::Antarctica => 30.0,
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Continent {
    type Err = UnknownContinent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|continent| continent.id() == needle)
            .ok_or_else(|| UnknownContinent(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for continent in Continent::ALL {
            assert_eq!(continent.id().parse::<Continent>(), Ok(continent));
        }
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(" Europe ".parse::<Continent>(), Ok(Continent::Europe));
        assert_eq!(
            "NORTH-AMERICA".parse::<Continent>(),
            Ok(Continent::NorthAmerica)
        );
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let err = "atlantis".parse::<Continent>().unwrap_err();
        assert_eq!(err.to_string(), "unknown continent: atlantis");
        assert!("earth".parse::<Continent>().is_err());
    }

    #[test]
    fn serde_uses_hyphenated_ids() {
        let json = serde_json::to_string(&Continent::SouthAmerica).unwrap();
        assert_eq!(json, "\"south-america\"");
        let back: Continent = serde_json::from_str("\"antarctica\"").unwrap();
        assert_eq!(back, Continent::Antarctica);
    }

    #[test]
    fn mock_ceilings_stay_within_percent_range() {
        for continent in Continent::ALL {
            let ceiling = continent.mock_ceiling();
            assert!(ceiling > 0.0 && ceiling <= 100.0, "{continent}: {ceiling}");
        }
    }
}
