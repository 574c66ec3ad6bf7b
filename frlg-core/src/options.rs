use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomizeTypes {
    #[default]
    Vanilla,
    Shuffle,
    CompletelyRandom,
    FollowEvolutions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomizeAbilities {
    #[default]
    Vanilla,
    CompletelyRandom,
    FollowEvolutions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomizeMoves {
    #[default]
    Vanilla,
    Randomized,
    StartWithFourMoves,
}

/// Shared by wild encounters, starters, misc statics and trainer parties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomizeSpecies {
    #[default]
    Vanilla,
    Random,
    MatchBaseStats,
    MatchType,
    MatchBaseStatsAndType,
}

impl RandomizeSpecies {
    pub fn matches_base_stats(self) -> bool {
        matches!(self, RandomizeSpecies::MatchBaseStats | RandomizeSpecies::MatchBaseStatsAndType)
    }

    pub fn matches_type(self) -> bool {
        matches!(self, RandomizeSpecies::MatchType | RandomizeSpecies::MatchBaseStatsAndType)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildPokemonGroups {
    #[default]
    None,
    Species,
    Dungeons,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomizeLegendaryPokemon {
    #[default]
    Vanilla,
    /// Only legendaries replace legendaries.
    Legendaries,
    Any,
    MatchBaseStats,
    MatchType,
    MatchBaseStatsAndType,
}

impl RandomizeLegendaryPokemon {
    pub fn matches_base_stats(self) -> bool {
        matches!(
            self,
            RandomizeLegendaryPokemon::MatchBaseStats | RandomizeLegendaryPokemon::MatchBaseStatsAndType
        )
    }

    pub fn matches_type(self) -> bool {
        matches!(
            self,
            RandomizeLegendaryPokemon::MatchType | RandomizeLegendaryPokemon::MatchBaseStatsAndType
        )
    }
}

/// TM/HM compatibility: keep the vanilla bits or re-roll each bit with the given percent chance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compatibility {
    #[default]
    Vanilla,
    Percent(u8),
}

/// Pokédex counts required by each Oak's Aide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OaksAideRequirements {
    pub route_2: u16,
    pub route_10: u16,
    pub route_11: u16,
    pub route_15: u16,
    pub route_16: u16,
}

impl Default for OaksAideRequirements {
    fn default() -> Self {
        OaksAideRequirements {
            route_2: 10,
            route_10: 20,
            route_11: 30,
            route_15: 50,
            route_16: 40,
        }
    }
}

impl OaksAideRequirements {
    /// Distinct wild species worth spreading before duplicates are allowed, with a 20% margin.
    pub fn min_species_needed(&self) -> usize {
        let most = [self.route_2, self.route_10, self.route_11, self.route_15, self.route_16]
            .into_iter()
            .max()
            .unwrap_or(0);
        (usize::from(most) * 12).div_ceil(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aide_quota_rounds_up() {
        let aides = OaksAideRequirements {
            route_2: 5,
            route_10: 11,
            route_11: 0,
            route_15: 3,
            route_16: 1,
        };
        assert_eq!(aides.min_species_needed(), 14);
        assert_eq!(OaksAideRequirements::default().min_species_needed(), 60);
    }

    #[test]
    fn options_use_snake_case_names() {
        let parsed: RandomizeSpecies = serde_json::from_str("\"match_base_stats_and_type\"").unwrap();
        assert!(parsed.matches_base_stats() && parsed.matches_type());
        let compat: Compatibility = serde_json::from_str("{\"percent\":40}").unwrap();
        assert_eq!(compat, Compatibility::Percent(40));
    }
}
