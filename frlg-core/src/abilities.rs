use rand::{rngs::StdRng, seq::SliceRandom};
use std::collections::BTreeSet;

use crate::data::{AbilityId, SpeciesId};
use crate::options::RandomizeAbilities;
use crate::{RandomizationContext, RandomizerError, Result};

fn draw_abilities(
    rng: &mut StdRng,
    allowed: &[AbilityId],
    old: (AbilityId, AbilityId),
) -> (AbilityId, AbilityId) {
    let mut draw = |slot: AbilityId| {
        if slot == 0 {
            0
        } else {
            allowed.choose(rng).copied().unwrap_or(slot)
        }
    };
    let first = draw(old.0);
    let second = draw(old.1);
    (first, second)
}

pub(crate) fn randomize_abilities(ctx: &mut RandomizationContext) -> Result<()> {
    let option = ctx.settings.abilities;
    if option == RandomizeAbilities::Vanilla {
        return Ok(());
    }

    let count = ctx.data.constant("ABILITIES_COUNT")?;
    let none = ctx.data.constant("ABILITY_NONE")?;
    let cacophony = ctx.data.constant("ABILITY_CACOPHONY")?;
    let allowed: Vec<AbilityId> = (0..count)
        .filter(|&id| id != none && id != cacophony)
        .filter_map(|id| AbilityId::try_from(id).ok())
        .filter(|id| !ctx.blacklists.abilities.contains(id))
        .collect();
    if allowed.is_empty() {
        return Err(RandomizerError::Config(
            "every ability is blacklisted".to_string(),
        ));
    }

    let RandomizationContext {
        data, rng, species, ..
    } = ctx;

    match option {
        RandomizeAbilities::Vanilla => {}
        RandomizeAbilities::CompletelyRandom => {
            for s in species.values_mut() {
                s.abilities = draw_abilities(rng, &allowed, s.abilities);
            }
        }
        RandomizeAbilities::FollowEvolutions => {
            let ids: Vec<SpeciesId> = species.keys().copied().collect();
            let mut done: BTreeSet<SpeciesId> = BTreeSet::new();

            for id in ids {
                if done.contains(&id) {
                    continue;
                }
                let Some(baseline) = data.species.get(&id) else { continue };
                // Species that inherit their abilities get them from the family root.
                let inherits = baseline
                    .pre_evolution
                    .and_then(|pre| data.species.get(&pre))
                    .map_or(false, |pre| pre.abilities == baseline.abilities);
                if inherits {
                    continue;
                }

                let old = species[&id].abilities;
                let new = draw_abilities(rng, &allowed, old);

                let mut family = vec![id];
                while let Some(current) = family.pop() {
                    let Some(evolution) = species.get_mut(&current) else { continue };
                    if evolution.abilities == old && done.insert(current) {
                        evolution.abilities = new;
                        family.extend(evolution.evolutions.iter().map(|e| e.species_id));
                    }
                }
            }
        }
    }

    log::info!("Randomized abilities ({option:?})");
    Ok(())
}
