//! Static copy shown on the landing page.
use quest_gateway::{Continent, Difficulty};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinentDetails {
    pub icon: &'static str,
    pub description: &'static str,
    pub challenges: [&'static str; 3],
}

#[must_use]
pub const fn continent_details(continent: Continent) -> ContinentDetails {
    match continent {
        Continent::NorthAmerica => ContinentDetails {
            icon: "🏔️",
            description: "Explore vast wilderness and modern cities",
            challenges: ["Mountain Navigation", "Urban Puzzles", "Wildlife Encounters"],
        },
        Continent::SouthAmerica => ContinentDetails {
            icon: "🌿",
            description: "Journey through rainforests and ancient ruins",
            challenges: [
                "Jungle Survival",
                "Archaeological Mysteries",
                "River Navigation",
            ],
        },
        Continent::Europe => ContinentDetails {
            icon: "🏰",
            description: "Navigate through rich history and culture",
            challenges: ["Historical Puzzles", "Language Challenges", "Cultural Quests"],
        },
        Continent::Africa => ContinentDetails {
            icon: "🦁",
            description: "Adventure across diverse landscapes and cultures",
            challenges: ["Safari Navigation", "Desert Survival", "Cultural Exchange"],
        },
        Continent::Asia => ContinentDetails {
            icon: "🏯",
            description: "Master ancient wisdom and modern innovation",
            challenges: ["Temple Puzzles", "Technology Challenges", "Martial Arts"],
        },
        Continent::Australia => ContinentDetails {
            icon: "🦘",
            description: "Discover unique wildlife and vast outback",
            challenges: ["Outback Survival", "Marine Adventures", "Aboriginal Culture"],
        },
        Continent::Antarctica => ContinentDetails {
            icon: "🐧",
            description: "Survive the ultimate frozen challenge",
            challenges: ["Extreme Weather", "Scientific Research", "Survival Skills"],
        },
    }
}

#[must_use]
pub const fn difficulty_icon(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "🌱",
        Difficulty::Medium => "⚡",
        Difficulty::Hard => "🔥",
        Difficulty::Extreme => "💀",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_continent_has_three_distinct_challenges() {
        for continent in Continent::ALL {
            let details = continent_details(continent);
            assert!(!details.description.is_empty());
            let [a, b, c] = details.challenges;
            assert!(a != b && b != c && a != c, "{continent}");
        }
    }
}
