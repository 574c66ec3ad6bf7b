use crate::candidates::{select_species, type_mismatches, ExclusionTiers};
use crate::data::{SpeciesData, TrainerPokemon};
use crate::movesets::assign_moveset;
use crate::options::RandomizeSpecies;
use crate::{RandomizationContext, RandomizerError, Result};

pub(crate) fn randomize_trainer_parties(ctx: &mut RandomizationContext) -> Result<()> {
    let option = ctx.settings.trainers;
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
        ..
    } = ctx;
    let universe: Vec<&SpeciesData> = species.values().collect();

    let mut replaced = 0usize;
    for trainer in trainers.values_mut() {
        for member in trainer.party.iter_mut().filter(|m| !m.locked) {
            let original = data.species.get(&member.species_id).ok_or_else(|| {
                RandomizerError::Config(format!(
                    "{} references unknown species {}",
                    trainer.name, member.species_id
                ))
            })?;

            // Tier 0 stays empty: nothing is mandatory for trainer parties.
            let mut tiers = ExclusionTiers::new();
            tiers.exclude(1, blacklists.trainers.iter().copied());
            if option.matches_type() {
                tiers.exclude(2, type_mismatches(universe.iter().copied(), original.types));
            }
            let target = option.matches_base_stats().then(|| original.base_stats.total());

            let new_id = select_species(&universe, &tiers, target, rng, &trainer.name)?;
            let new_species = species.get(&new_id).unwrap_or(original);
            let moves = assign_moveset(data, per_species_tmhm_moves, rng, new_species, member.level);
            *member = TrainerPokemon {
                species_id: new_id,
                level: member.level,
                moves,
                locked: false,
            };
            replaced += 1;
        }
    }

    log::info!("Randomized {replaced} trainer Pokémon ({option:?})");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SpeciesId;
    use crate::testkit::sample_snapshot;
    use crate::RandomizerSettings;
    use std::sync::Arc;

    #[test]
    fn locked_members_are_skipped() {
        let mut data = sample_snapshot();
        let brock = data.trainers.get_mut(&414).unwrap();
        brock.party[0].locked = true;
        let data = Arc::new(data);

        for seed in 0..10 {
            let settings = RandomizerSettings {
                seed,
                trainers: RandomizeSpecies::Random,
                ..RandomizerSettings::default()
            };
            let mut ctx = RandomizationContext::new(Arc::clone(&data), settings).unwrap();
            randomize_trainer_parties(&mut ctx).unwrap();
            assert_eq!(ctx.trainers[&414].party[0], data.trainers[&414].party[0]);
            assert!(!ctx.trainers[&414].party[1].locked);
            assert_eq!(ctx.trainers[&414].party[1].level, data.trainers[&414].party[1].level);
        }
    }

    #[test]
    fn trainer_blacklist_is_honored() {
        let blacklisted: Vec<&str> = vec!["Geodude", "Onix", "Zubat", "Pidgey", "Rattata"];
        for seed in 0..10 {
            let settings = RandomizerSettings {
                seed,
                trainers: RandomizeSpecies::MatchBaseStats,
                trainer_blacklist: blacklisted.iter().map(|s| s.to_string()).collect(),
                ..RandomizerSettings::default()
            };
            let mut ctx = RandomizationContext::new(Arc::new(sample_snapshot()), settings).unwrap();
            randomize_trainer_parties(&mut ctx).unwrap();
            let banned: Vec<SpeciesId> = vec![74, 95, 41, 16, 19];
            for trainer in ctx.trainers.values() {
                for member in &trainer.party {
                    assert!(!banned.contains(&member.species_id));
                }
            }
        }
    }

    #[test]
    fn type_matching_uses_the_unrandomized_party() {
        for seed in 0..10 {
            let settings = RandomizerSettings {
                seed,
                trainers: RandomizeSpecies::MatchType,
                ..RandomizerSettings::default()
            };
            let mut ctx = RandomizationContext::new(Arc::new(sample_snapshot()), settings).unwrap();
            // Geodude became a Ghost earlier; Onix is now the only Rock/Ground species.
            ctx.species.get_mut(&74).unwrap().types = (7, 7);
            randomize_trainer_parties(&mut ctx).unwrap();
            assert_eq!(ctx.trainers[&414].party[0].species_id, 95, "seed {seed}");
        }
    }
}
