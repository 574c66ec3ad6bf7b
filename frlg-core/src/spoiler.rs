use std::collections::BTreeMap;

use crate::data::{DataSnapshot, SpeciesId, StaticPokemonData};
use crate::tables::STARTER_ORDER;
use crate::RandomizedData;

const TYPE_NAMES: [&str; 18] = [
    "Normal", "Fighting", "Flying", "Poison", "Ground", "Rock", "Bug", "Ghost", "Steel", "???",
    "Fire", "Water", "Grass", "Electric", "Psychic", "Ice", "Dragon", "Dark",
];

fn type_name(id: u8) -> &'static str {
    TYPE_NAMES.get(usize::from(id)).copied().unwrap_or("?")
}

impl RandomizedData {
    fn species_name(&self, id: SpeciesId) -> &str {
        self.species.get(&id).map_or("???", |s| s.name.as_str())
    }

    fn push_statics(
        &self,
        log: &mut String,
        title: &str,
        baseline: &BTreeMap<String, StaticPokemonData>,
        placed: &BTreeMap<String, StaticPokemonData>,
    ) {
        let version = self.game_version.data_version();
        log.push_str(&format!("{title}:\n"));
        for (name, encounter) in placed {
            let Some(&new_id) = encounter.species_id.get(&version) else { continue };
            let old_id = baseline
                .get(name)
                .and_then(|b| b.species_id.get(&version))
                .copied()
                .unwrap_or(new_id);
            log.push_str(&format!(
                "  {name}: {} -> {}\n",
                self.species_name(old_id),
                self.species_name(new_id)
            ));
        }
    }

    /// Human-readable summary of the placements and species changes.
    pub fn spoiler_log(&self, data: &DataSnapshot) -> String {
        let mut log = format!("FRLG Randomizer seed: {}\n", self.seed);
        log.push_str(&format!("Game version: {}\n\n", self.game_version));

        log.push_str("Starters:\n");
        for name in STARTER_ORDER {
            let Some(starter) = self.starters.get(name) else { continue };
            let old_id = data.starters.get(name).map_or(starter.species_id, |s| s.species_id);
            log.push_str(&format!(
                "  {name}: {} -> {}\n",
                self.species_name(old_id),
                self.species_name(starter.species_id)
            ));
        }
        log.push('\n');

        self.push_statics(&mut log, "Legendary Pokémon", &data.legendary_pokemon, &self.legendary_pokemon);
        log.push('\n');
        self.push_statics(&mut log, "Misc Pokémon", &data.misc_pokemon, &self.misc_pokemon);
        log.push('\n');

        log.push_str("Species:\n");
        for species in self.species.values() {
            let (t1, t2) = species.types;
            let types = if t1 == t2 {
                type_name(t1).to_string()
            } else {
                format!("{}/{}", type_name(t1), type_name(t2))
            };
            log.push_str(&format!(
                "  #{:03} {:<12} types={:<17} abilities=({}, {}) tmhm={:#018x}\n",
                species.national_dex_number,
                species.name,
                types,
                species.abilities.0,
                species.abilities.1,
                species.tm_hm_compatibility
            ));
        }

        log
    }
}

#[cfg(test)]
mod tests {
    use crate::options::RandomizeSpecies;
    use crate::testkit::sample_snapshot;
    use crate::{generate, RandomizerSettings};
    use std::sync::Arc;

    #[test]
    fn spoiler_lists_starters_and_species() {
        let data = Arc::new(sample_snapshot());
        let settings = RandomizerSettings {
            seed: 9,
            starters: RandomizeSpecies::Random,
            ..RandomizerSettings::default()
        };
        let out = generate(Arc::clone(&data), &settings).unwrap();
        let log = out.spoiler_log(&data);

        assert!(log.starts_with("FRLG Randomizer seed: 9\n"));
        assert!(log.contains("STARTER_POKEMON_BULBASAUR: Bulbasaur -> "));
        assert!(log.contains("Legendary Pokémon:\n  LEGENDARY_POKEMON_ARTICUNO: Articuno -> Articuno"));
        assert!(log.contains("Grass/Poison"));
    }
}
