use rand::{rngs::StdRng, seq::SliceRandom};

use crate::candidates::{select_species, type_mismatches, ExclusionTiers};
use crate::data::{SpeciesData, SpeciesId, TrainerPokemon};
use crate::movesets::assign_moveset;
use crate::options::RandomizeSpecies;
use crate::tables::{rival_starter_slots, STARTER_ORDER};
use crate::{RandomizationContext, RandomizerError, Result};

pub(crate) fn randomize_starters(ctx: &mut RandomizationContext) -> Result<()> {
    let option = ctx.settings.starters;
    if option == RandomizeSpecies::Vanilla {
        return Ok(());
    }

    let RandomizationContext {
        data,
        rng,
        blacklists,
        per_species_tmhm_moves,
        species,
        trainers,
        starters,
        ..
    } = ctx;
    let universe: Vec<&SpeciesData> = species.values().collect();

    let mut chosen: Vec<(&'static str, SpeciesId)> = Vec::with_capacity(STARTER_ORDER.len());
    for name in STARTER_ORDER {
        let starter = starters
            .get_mut(name)
            .ok_or_else(|| RandomizerError::Config(format!("missing starter {name}")))?;
        let original = data.species.get(&starter.species_id).ok_or_else(|| {
            RandomizerError::Config(format!("{name} references unknown species {}", starter.species_id))
        })?;

        let mut tiers = ExclusionTiers::new();
        tiers.exclude(0, chosen.iter().map(|(_, id)| *id));
        tiers.exclude(1, blacklists.starters.iter().copied());
        if option.matches_type() {
            tiers.exclude(2, type_mismatches(universe.iter().copied(), original.types));
        }
        let target = option.matches_base_stats().then(|| original.base_stats.total());

        let new_id = select_species(&universe, &tiers, target, rng, name)?;
        starter.species_id = new_id;
        chosen.push((name, new_id));
    }

    // The rival takes whichever ball the player leaves, evolving it over the game.
    for (name, starter_id) in chosen {
        let first = species
            .get(&starter_id)
            .ok_or_else(|| RandomizerError::Config(format!("unknown starter species {starter_id}")))?;
        let evolve = |from: &SpeciesData, rng: &mut StdRng| {
            from.evolutions
                .choose(rng)
                .and_then(|evolution| species.get(&evolution.species_id))
        };
        let stages = match evolve(first, &mut *rng) {
            Some(second) => [first, second, evolve(second, &mut *rng).unwrap_or(second)],
            None => [first, first, first],
        };

        let slots = rival_starter_slots(name)
            .ok_or_else(|| RandomizerError::Config(format!("no rival table for {name}")))?;
        for &(trainer_name, party_index, stage) in slots {
            let trainer_id = u16::try_from(data.constant(trainer_name)?)
                .map_err(|_| RandomizerError::Config(format!("{trainer_name} is not a trainer id")))?;
            let trainer = trainers
                .get_mut(&trainer_id)
                .ok_or_else(|| RandomizerError::Config(format!("missing trainer {trainer_name}")))?;
            let member = trainer.party.get_mut(party_index).ok_or_else(|| {
                RandomizerError::Config(format!("{trainer_name} has no party slot {party_index}"))
            })?;

            let stage_species = stages[stage];
            let moves = assign_moveset(data, per_species_tmhm_moves, rng, stage_species, member.level);
            *member = TrainerPokemon {
                species_id: stage_species.species_id,
                level: member.level,
                moves,
                locked: true,
            };
        }
    }

    log::info!("Randomized starters ({option:?})");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::sample_snapshot;
    use crate::RandomizerSettings;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn run(option: RandomizeSpecies, seed: u64) -> RandomizationContext {
        let settings = RandomizerSettings {
            seed,
            starters: option,
            ..RandomizerSettings::default()
        };
        let mut ctx = RandomizationContext::new(Arc::new(sample_snapshot()), settings).unwrap();
        randomize_starters(&mut ctx).unwrap();
        ctx
    }

    #[test]
    fn three_distinct_starters_are_chosen() {
        for seed in 0..20 {
            let ctx = run(RandomizeSpecies::Random, seed);
            let ids: BTreeSet<SpeciesId> = ctx.starters.values().map(|s| s.species_id).collect();
            assert_eq!(ids.len(), 3);
        }
    }

    #[test]
    fn rival_parties_follow_the_new_starter_line() {
        for seed in 0..20 {
            let ctx = run(RandomizeSpecies::MatchBaseStats, seed);
            for name in STARTER_ORDER {
                let starter = ctx.starters[name].species_id;
                let mut line = vec![starter];
                let mut frontier = vec![starter];
                while let Some(id) = frontier.pop() {
                    for evo in &ctx.species[&id].evolutions {
                        line.push(evo.species_id);
                        frontier.push(evo.species_id);
                    }
                }

                for &(trainer_name, index, stage) in rival_starter_slots(name).unwrap() {
                    let trainer_id = ctx.data.constant(trainer_name).unwrap() as u16;
                    let member = ctx.trainers[&trainer_id].party[index];
                    let baseline = ctx.data.trainers[&trainer_id].party[index];
                    assert!(member.locked);
                    assert_eq!(member.level, baseline.level);
                    assert!(line.contains(&member.species_id));
                    if stage == 0 {
                        assert_eq!(member.species_id, starter);
                    }
                }
            }
        }
    }

    #[test]
    fn other_rival_members_are_untouched() {
        let ctx = run(RandomizeSpecies::Random, 5);
        for name in STARTER_ORDER {
            for &(trainer_name, index, _) in rival_starter_slots(name).unwrap() {
                let trainer_id = ctx.data.constant(trainer_name).unwrap() as u16;
                let before = &ctx.data.trainers[&trainer_id].party;
                let after = &ctx.trainers[&trainer_id].party;
                for (i, (b, a)) in before.iter().zip(after).enumerate() {
                    if i != index {
                        assert_eq!(b, a);
                    }
                }
            }
        }
    }

    #[test]
    fn type_matching_uses_the_unrandomized_starter() {
        for seed in 0..10 {
            let settings = RandomizerSettings {
                seed,
                starters: RandomizeSpecies::MatchType,
                ..RandomizerSettings::default()
            };
            let mut ctx = RandomizationContext::new(Arc::new(sample_snapshot()), settings).unwrap();
            ctx.species.get_mut(&1).unwrap().types = (7, 7);
            randomize_starters(&mut ctx).unwrap();

            let picked = ctx.starters["STARTER_POKEMON_BULBASAUR"].species_id;
            assert!(ctx.species[&picked].shares_type_with((12, 3)), "seed {seed}: {picked}");
        }
    }
}
