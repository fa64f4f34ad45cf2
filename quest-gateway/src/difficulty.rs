use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Challenge level chosen before starting the globe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty: {0}")]
pub struct UnknownDifficulty(pub String);

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Extreme];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
        }
    }

    /// Player-facing rank name.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Easy => "Explorer",
            Self::Medium => "Adventurer",
            Self::Hard => "Master",
            Self::Extreme => "Legend",
        }
    }

    #[must_use]
    pub const fn blurb(self) -> &'static str {
        match self {
            Self::Easy => "Perfect for beginners",
            Self::Medium => "Balanced challenge",
            Self::Hard => "For experienced players",
            Self::Extreme => "Ultimate challenge",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.id() == needle)
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn parses_known_levels() {
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("Extreme".parse::<Difficulty>(), Ok(Difficulty::Extreme));
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn titles_match_levels() {
        let titles: Vec<_> = Difficulty::ALL.iter().map(|d| d.title()).collect();
        assert_eq!(titles, ["Explorer", "Adventurer", "Master", "Legend"]);
    }
}
