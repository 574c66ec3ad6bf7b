use rand::{rngs::StdRng, seq::SliceRandom, Rng};
use std::collections::BTreeSet;

use crate::data::{SpeciesId, TypeId, MYSTERY_TYPE, NUM_TYPES};
use crate::options::RandomizeTypes;
use crate::RandomizationContext;

/// A permutation of every type id that keeps the mystery type in place.
fn type_permutation(rng: &mut StdRng) -> Vec<TypeId> {
    let mut type_map: Vec<TypeId> = (0..NUM_TYPES).collect();
    type_map.shuffle(rng);

    // No species has the ??? type and none should gain it.
    if let Some(index) = type_map.iter().position(|&t| t == MYSTERY_TYPE) {
        type_map.swap(index, usize::from(MYSTERY_TYPE));
    }
    type_map
}

fn random_type(rng: &mut StdRng) -> TypeId {
    loop {
        let picked = rng.gen_range(0..NUM_TYPES);
        if picked != MYSTERY_TYPE {
            return picked;
        }
    }
}

fn remap(type_map: &[TypeId], types: (TypeId, TypeId)) -> (TypeId, TypeId) {
    let lookup = |t: TypeId| type_map.get(usize::from(t)).copied().unwrap_or(t);
    (lookup(types.0), lookup(types.1))
}

pub(crate) fn randomize_types(ctx: &mut RandomizationContext) {
    let RandomizationContext {
        settings,
        rng,
        species,
        ..
    } = ctx;

    match settings.types {
        RandomizeTypes::Vanilla => return,
        RandomizeTypes::Shuffle => {
            let type_map = type_permutation(rng);
            for s in species.values_mut() {
                s.types = remap(&type_map, s.types);
            }
        }
        RandomizeTypes::CompletelyRandom => {
            for s in species.values_mut() {
                let first = random_type(rng);
                let mut second = first;
                if s.types.0 != s.types.1 {
                    while second == first {
                        second = random_type(rng);
                    }
                }
                s.types = (first, second);
            }
        }
        RandomizeTypes::FollowEvolutions => {
            let ids: Vec<SpeciesId> = species.keys().copied().collect();
            let mut done: BTreeSet<SpeciesId> = BTreeSet::new();

            for id in ids {
                let is_root = species
                    .get(&id)
                    .map_or(false, |s| s.pre_evolution.is_none());
                if done.contains(&id) || !is_root {
                    continue;
                }

                let type_map = type_permutation(rng);
                let mut family = vec![id];
                while let Some(current) = family.pop() {
                    if !done.insert(current) {
                        continue;
                    }
                    if let Some(s) = species.get_mut(&current) {
                        s.types = remap(&type_map, s.types);
                        family.extend(s.evolutions.iter().map(|e| e.species_id));
                    }
                }
            }
        }
    }

    log::info!("Randomized types ({:?})", settings.types);
}
