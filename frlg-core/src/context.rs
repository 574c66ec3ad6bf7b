use rand::{rngs::StdRng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::data::{
    AbilityId, DataSnapshot, EventData, GameVersion, MapData, MoveId, SpeciesData, SpeciesId,
    StarterData, StaticPokemonData, TrainerData,
};
use crate::tables::LEGENDARIES_BLACKLIST_ENTRY;
use crate::{RandomizedData, RandomizerError, RandomizerSettings, Result};

/// Player-supplied exclusions, resolved to ids.
#[derive(Debug, Default)]
pub(crate) struct Blacklists {
    pub wild: BTreeSet<SpeciesId>,
    pub starters: BTreeSet<SpeciesId>,
    pub trainers: BTreeSet<SpeciesId>,
    pub abilities: BTreeSet<AbilityId>,
    pub moves: BTreeSet<MoveId>,
}

/// Per-run state: the mutable working copies, the memo and the single seeded stream.
pub struct RandomizationContext {
    pub(crate) data: Arc<DataSnapshot>,
    pub(crate) settings: RandomizerSettings,
    /// Version whose species placements are rewritten.
    pub(crate) version: GameVersion,
    pub(crate) rng: StdRng,
    pub(crate) blacklists: Blacklists,
    pub(crate) per_species_tmhm_moves: BTreeMap<SpeciesId, Vec<MoveId>>,
    pub species: BTreeMap<SpeciesId, SpeciesData>,
    pub maps: BTreeMap<String, MapData>,
    pub trainers: BTreeMap<u16, TrainerData>,
    pub starters: BTreeMap<String, StarterData>,
    pub legendary_pokemon: BTreeMap<String, StaticPokemonData>,
    pub misc_pokemon: BTreeMap<String, StaticPokemonData>,
    pub events: BTreeMap<String, EventData>,
}

impl RandomizationContext {
    pub fn new(data: Arc<DataSnapshot>, settings: RandomizerSettings) -> Result<Self> {
        let blacklists = resolve_blacklists(&data, &settings)?;

        Ok(RandomizationContext {
            version: settings.game_version.data_version(),
            rng: StdRng::seed_from_u64(settings.seed),
            blacklists,
            per_species_tmhm_moves: BTreeMap::new(),
            species: data.species.clone(),
            maps: data.maps.clone(),
            trainers: data.trainers.clone(),
            starters: data.starters.clone(),
            legendary_pokemon: data.legendary_pokemon.clone(),
            misc_pokemon: data.misc_pokemon.clone(),
            events: data.events.clone(),
            data,
            settings,
        })
    }

    pub fn into_randomized(self) -> RandomizedData {
        RandomizedData {
            seed: self.settings.seed,
            game_version: self.settings.game_version,
            species: self.species,
            maps: self.maps,
            trainers: self.trainers,
            starters: self.starters,
            legendary_pokemon: self.legendary_pokemon,
            misc_pokemon: self.misc_pokemon,
            events: self.events,
        }
    }
}

fn resolve_blacklists(data: &DataSnapshot, settings: &RandomizerSettings) -> Result<Blacklists> {
    Ok(Blacklists {
        wild: resolve_species(data, &settings.wild_pokemon_blacklist)?,
        starters: resolve_species(data, &settings.starter_blacklist)?,
        trainers: resolve_species(data, &settings.trainer_blacklist)?,
        abilities: resolve_constants(data, "ABILITY_", &settings.ability_blacklist)?
            .into_iter()
            .map(|id| {
                AbilityId::try_from(id)
                    .map_err(|_| RandomizerError::Config(format!("ability id {id} out of range")))
            })
            .collect::<Result<_>>()?,
        moves: resolve_constants(data, "MOVE_", &settings.move_blacklist)?
            .into_iter()
            .map(|id| {
                MoveId::try_from(id)
                    .map_err(|_| RandomizerError::Config(format!("move id {id} out of range")))
            })
            .collect::<Result<_>>()?,
    })
}

fn resolve_species(data: &DataSnapshot, names: &BTreeSet<String>) -> Result<BTreeSet<SpeciesId>> {
    let mut ids = BTreeSet::new();
    for name in names {
        if name == LEGENDARIES_BLACKLIST_ENTRY {
            ids.extend(data.legendary_species());
            continue;
        }
        let species = data
            .species_by_name(name)
            .ok_or_else(|| RandomizerError::Config(format!("unknown species '{name}' in blacklist")))?;
        ids.insert(species.species_id);
    }
    Ok(ids)
}

/// Accepts either the constant name (`MOVE_TACKLE`) or the display name (`Tackle`).
fn resolve_constants(data: &DataSnapshot, prefix: &str, names: &BTreeSet<String>) -> Result<Vec<i64>> {
    names
        .iter()
        .map(|name| {
            let key = if name.starts_with(prefix) {
                name.clone()
            } else {
                format!("{prefix}{}", name.trim().to_uppercase().replace([' ', '-'], "_"))
            };
            data.constants
                .get(&key)
                .copied()
                .ok_or_else(|| RandomizerError::Config(format!("unknown blacklist entry '{name}'")))
        })
        .collect()
}
