use rand::seq::SliceRandom;
use std::collections::{BTreeMap, BTreeSet};

use crate::candidates::{select_species, type_mismatches, ExclusionTiers};
use crate::data::{EncounterKind, EncounterSlot, SpeciesData, SpeciesId};
use crate::options::{RandomizeSpecies, WildPokemonGroups};
use crate::tables::{dungeon_group, ROUTE_21_NORTH, ROUTE_21_SOUTH};
use crate::{RandomizationContext, RandomizerError, Result};

// Exclusion priorities for a wild substitution.
const TIER_DUPLICATE: usize = 0;
const TIER_AIDE_QUOTA: usize = 1;
const TIER_BLACKLIST: usize = 2;
const TIER_TYPE: usize = 3;

fn route_21_twin(map_name: &str) -> Option<&'static str> {
    match map_name {
        ROUTE_21_NORTH => Some(ROUTE_21_SOUTH),
        ROUTE_21_SOUTH => Some(ROUTE_21_NORTH),
        _ => None,
    }
}

pub(crate) fn randomize_wild_encounters(ctx: &mut RandomizationContext) -> Result<()> {
    let option = ctx.settings.wild_pokemon;
    if option == RandomizeSpecies::Vanilla {
        return Ok(());
    }
    let groups = ctx.settings.wild_pokemon_groups;
    let min_needed = ctx.settings.oaks_aides.min_species_needed();
    let version = ctx.version;

    let RandomizationContext {
        data,
        rng,
        species,
        maps,
        blacklists,
        ..
    } = ctx;
    let universe: Vec<&SpeciesData> = species.values().collect();

    let mut species_map: BTreeMap<SpeciesId, SpeciesId> = BTreeMap::new();
    let mut dungeon_maps: BTreeMap<&'static str, BTreeMap<SpeciesId, SpeciesId>> = BTreeMap::new();
    let mut placed: BTreeSet<SpeciesId> = BTreeSet::new();
    let mut route_21_randomized = false;

    let mut map_names: Vec<String> = maps.keys().cloned().collect();
    map_names.shuffle(rng);

    for map_name in map_names {
        // Both halves of Route 21 share one set of encounters.
        if let Some(twin) = route_21_twin(&map_name) {
            if route_21_randomized {
                let copied: Vec<Option<Vec<EncounterSlot>>> = EncounterKind::ALL
                    .iter()
                    .map(|&kind| {
                        maps.get(twin)
                            .and_then(|m| m.table(kind))
                            .and_then(|t| t.slots.get(&version))
                            .cloned()
                    })
                    .collect();
                if let Some(map) = maps.get_mut(&map_name) {
                    for (&kind, slots) in EncounterKind::ALL.iter().zip(copied) {
                        if let (Some(table), Some(slots)) = (map.table_mut(kind), slots) {
                            table.slots.insert(version, slots);
                        }
                    }
                }
                continue;
            }
            route_21_randomized = true;
        }

        let group = match groups {
            WildPokemonGroups::Dungeons => dungeon_group(&map_name),
            _ => None,
        };

        let Some(map) = maps.get_mut(&map_name) else { continue };
        for kind in EncounterKind::ALL {
            let Some(table) = map.table_mut(kind) else { continue };
            let Some(slots) = table.slots.get(&version) else { continue };

            // One substitution per original species on this table.
            let mut old_to_new: BTreeMap<SpeciesId, SpeciesId> = BTreeMap::new();
            for slot in slots {
                if old_to_new.contains_key(&slot.species_id) {
                    continue;
                }

                let grouped = match (groups, group) {
                    (WildPokemonGroups::Species, _) => species_map.get(&slot.species_id).copied(),
                    (WildPokemonGroups::Dungeons, Some(g)) => dungeon_maps
                        .get(g)
                        .and_then(|m| m.get(&slot.species_id))
                        .copied(),
                    _ => None,
                };

                let new_id = match grouped {
                    Some(id) => id,
                    None => {
                        let original = data.species.get(&slot.species_id).ok_or_else(|| {
                            RandomizerError::Config(format!(
                                "{map_name} references unknown species {}",
                                slot.species_id
                            ))
                        })?;

                        let mut tiers = ExclusionTiers::new();
                        tiers.exclude(TIER_DUPLICATE, old_to_new.values().copied());
                        match (groups, group) {
                            (WildPokemonGroups::Species, _) => {
                                tiers.exclude(TIER_DUPLICATE, species_map.values().copied())
                            }
                            (WildPokemonGroups::Dungeons, Some(g)) => {
                                if let Some(m) = dungeon_maps.get(g) {
                                    tiers.exclude(TIER_DUPLICATE, m.values().copied());
                                }
                            }
                            _ => {}
                        }
                        if placed.len() < min_needed {
                            tiers.exclude(TIER_AIDE_QUOTA, placed.iter().copied());
                        }
                        tiers.exclude(TIER_BLACKLIST, blacklists.wild.iter().copied());
                        if option.matches_type() {
                            tiers.exclude(TIER_TYPE, type_mismatches(universe.iter().copied(), original.types));
                        }

                        let target = option
                            .matches_base_stats()
                            .then(|| original.base_stats.total());
                        let chosen = select_species(
                            &universe,
                            &tiers,
                            target,
                            rng,
                            &format!("wild {} on {map_name}", original.name),
                        )?;

                        match (groups, group) {
                            (WildPokemonGroups::Species, _) => {
                                species_map.insert(slot.species_id, chosen);
                            }
                            (WildPokemonGroups::Dungeons, Some(g)) => {
                                dungeon_maps.entry(g).or_default().insert(slot.species_id, chosen);
                            }
                            _ => {}
                        }
                        chosen
                    }
                };

                old_to_new.insert(slot.species_id, new_id);
                placed.insert(new_id);
            }

            let new_slots: Vec<EncounterSlot> = slots
                .iter()
                .map(|slot| EncounterSlot {
                    species_id: old_to_new.get(&slot.species_id).copied().unwrap_or(slot.species_id),
                    ..*slot
                })
                .collect();
            table.slots.insert(version, new_slots);
        }
    }

    log::info!(
        "Randomized wild encounters ({option:?}, {} distinct species placed)",
        placed.len()
    );
    Ok(())
}
