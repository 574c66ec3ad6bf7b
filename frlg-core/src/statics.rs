use std::collections::{BTreeMap, BTreeSet};

use crate::candidates::{select_species, type_mismatches, ExclusionTiers};
use crate::data::{
    DataSnapshot, EventData, GameVersion, SpeciesData, SpeciesId, StaticPokemonData, VersionedText,
};
use crate::options::{RandomizeLegendaryPokemon, RandomizeSpecies};
use crate::{RandomizationContext, RandomizerError, Result};

fn static_species<'a>(
    species: &'a BTreeMap<SpeciesId, SpeciesData>,
    name: &str,
    encounter: &StaticPokemonData,
    version: GameVersion,
) -> Result<&'a SpeciesData> {
    let id = encounter
        .species_id
        .get(&version)
        .ok_or_else(|| RandomizerError::Config(format!("{name} has no species for {version}")))?;
    species
        .get(id)
        .ok_or_else(|| RandomizerError::Config(format!("{name} references unknown species {id}")))
}

/// Rewrites the reward label of every event named after a static encounter.
///
/// `Static X` and `Missable X` labels follow the new species; any other label keeps its
/// first word.
fn relabel_events(
    data: &DataSnapshot,
    events: &mut BTreeMap<String, EventData>,
    statics: &BTreeMap<String, StaticPokemonData>,
    species: &BTreeMap<SpeciesId, SpeciesData>,
    version: GameVersion,
) -> Result<()> {
    for (name, encounter) in statics {
        let (Some(event), Some(baseline)) = (events.get_mut(name), data.events.get(name)) else {
            continue;
        };
        let placed = static_species(species, name, encounter, version)?;
        let label = baseline.item.for_version(version);
        let item = match label.split_whitespace().next() {
            Some("Static") => format!("Static {}", placed.name),
            Some("Missable") => format!("Missable {}", placed.name),
            Some(first) => first.to_string(),
            None => String::new(),
        };
        event.item = VersionedText::Single(item);
    }
    Ok(())
}

pub(crate) fn randomize_legendaries(ctx: &mut RandomizationContext) -> Result<()> {
    let option = ctx.settings.legendary_pokemon;
    if option == RandomizeLegendaryPokemon::Vanilla {
        return Ok(());
    }
    let version = ctx.version;
    let legendaries = ctx.data.legendary_species();

    let RandomizationContext {
        data,
        rng,
        species,
        legendary_pokemon,
        events,
        ..
    } = ctx;
    let universe: Vec<&SpeciesData> = species
        .values()
        .filter(|s| option != RandomizeLegendaryPokemon::Legendaries || legendaries.contains(&s.species_id))
        .collect();

    let mut placed: BTreeSet<SpeciesId> = BTreeSet::new();
    for (name, encounter) in legendary_pokemon.iter_mut() {
        let original = static_species(species, name, encounter, version)?;

        let mut tiers = ExclusionTiers::new();
        tiers.exclude(0, placed.iter().copied());
        if option.matches_type() {
            tiers.exclude(1, type_mismatches(universe.iter().copied(), original.types));
        }
        let target = option.matches_base_stats().then(|| original.base_stats.total());

        let new_id = select_species(&universe, &tiers, target, rng, name)?;
        encounter.species_id.insert(version, new_id);
        placed.insert(new_id);
    }

    relabel_events(data, events, legendary_pokemon, species, version)?;
    log::info!("Randomized {} legendary encounters ({option:?})", placed.len());
    Ok(())
}

pub(crate) fn randomize_misc_pokemon(ctx: &mut RandomizationContext) -> Result<()> {
    let option = ctx.settings.misc_pokemon;
    if option == RandomizeSpecies::Vanilla {
        return Ok(());
    }
    let version = ctx.version;

    let RandomizationContext {
        data,
        rng,
        species,
        misc_pokemon,
        events,
        ..
    } = ctx;
    let universe: Vec<&SpeciesData> = species.values().collect();

    for (name, encounter) in misc_pokemon.iter_mut() {
        let original = static_species(species, name, encounter, version)?;

        let mut tiers = ExclusionTiers::new();
        if option.matches_type() {
            tiers.exclude(1, type_mismatches(universe.iter().copied(), original.types));
        }
        let target = option.matches_base_stats().then(|| original.base_stats.total());

        let new_id = select_species(&universe, &tiers, target, rng, name)?;
        encounter.species_id.insert(version, new_id);
    }

    relabel_events(data, events, misc_pokemon, species, version)?;
    log::info!("Randomized {} misc encounters ({option:?})", misc_pokemon.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::sample_snapshot;
    use crate::RandomizerSettings;
    use std::sync::Arc;

    fn context(settings: RandomizerSettings) -> RandomizationContext {
        RandomizationContext::new(Arc::new(sample_snapshot()), settings).unwrap()
    }

    #[test]
    fn legendaries_mode_only_places_distinct_legendaries() {
        for seed in 0..20 {
            let mut ctx = context(RandomizerSettings {
                seed,
                legendary_pokemon: RandomizeLegendaryPokemon::Legendaries,
                ..RandomizerSettings::default()
            });
            randomize_legendaries(&mut ctx).unwrap();

            let legendaries = ctx.data.legendary_species();
            let placed: Vec<SpeciesId> = ctx
                .legendary_pokemon
                .values()
                .map(|l| l.species_id[&GameVersion::FireRed])
                .collect();
            let unique: BTreeSet<SpeciesId> = placed.iter().copied().collect();
            assert_eq!(unique.len(), placed.len());
            assert!(placed.iter().all(|id| legendaries.contains(id)));
        }
    }

    #[test]
    fn legendary_events_are_relabelled() {
        let mut ctx = context(RandomizerSettings {
            seed: 3,
            legendary_pokemon: RandomizeLegendaryPokemon::Any,
            ..RandomizerSettings::default()
        });
        randomize_legendaries(&mut ctx).unwrap();

        let articuno = ctx.legendary_pokemon["LEGENDARY_POKEMON_ARTICUNO"].species_id[&GameVersion::FireRed];
        let name = &ctx.species[&articuno].name;
        assert_eq!(
            ctx.events["LEGENDARY_POKEMON_ARTICUNO"].item,
            VersionedText::Single(format!("Static {name}"))
        );
    }

    #[test]
    fn misc_events_honor_per_version_labels() {
        let mut ctx = context(RandomizerSettings {
            seed: 10,
            game_version: GameVersion::LeafGreen,
            misc_pokemon: RandomizeSpecies::Random,
            ..RandomizerSettings::default()
        });
        randomize_misc_pokemon(&mut ctx).unwrap();

        let eevee = ctx.misc_pokemon["GIFT_POKEMON_EEVEE"].species_id[&GameVersion::LeafGreen];
        let name = &ctx.species[&eevee].name;
        assert_eq!(
            ctx.events["GIFT_POKEMON_EEVEE"].item,
            VersionedText::Single(format!("Missable {name}"))
        );
        // The other release's placement is left alone.
        assert_eq!(
            ctx.misc_pokemon["GIFT_POKEMON_EEVEE"].species_id[&GameVersion::FireRed],
            133
        );
    }

    #[test]
    fn misc_match_type_uses_its_own_option() {
        for seed in 0..20 {
            let mut ctx = context(RandomizerSettings {
                seed,
                misc_pokemon: RandomizeSpecies::MatchType,
                legendary_pokemon: RandomizeLegendaryPokemon::Vanilla,
                ..RandomizerSettings::default()
            });
            randomize_misc_pokemon(&mut ctx).unwrap();
            for (name, encounter) in &ctx.misc_pokemon {
                let before = ctx.data.misc_pokemon[name].species_id[&GameVersion::FireRed];
                let after = encounter.species_id[&GameVersion::FireRed];
                assert!(ctx.species[&after].shares_type_with(ctx.species[&before].types));
            }
        }
    }

    #[test]
    fn other_labels_keep_their_first_word() {
        let mut ctx = context(RandomizerSettings {
            seed: 1,
            misc_pokemon: RandomizeSpecies::Random,
            ..RandomizerSettings::default()
        });
        randomize_misc_pokemon(&mut ctx).unwrap();
        assert_eq!(
            ctx.events["TRADE_POKEMON_RAICHU"].item,
            VersionedText::Single("Trade".to_string())
        );
    }
}
