use rand::{rngs::StdRng, seq::SliceRandom, Rng};
use std::collections::{BTreeMap, BTreeSet};

use crate::data::{DataSnapshot, MoveId, SpeciesData, SpeciesId};

/// Chance that a slot takes a TM/HM move instead of a level-up move.
const TM_HM_MOVE_CHANCE: f64 = 0.25;

fn tm_hm_movepool(data: &DataSnapshot, species: &SpeciesData) -> Vec<MoveId> {
    let pool: BTreeSet<MoveId> = data
        .tmhm_moves
        .iter()
        .enumerate()
        .filter(|(bit, _)| *bit < 64 && species.tm_hm_compatibility & (1u64 << bit) != 0)
        .map(|(_, &move_id)| move_id)
        .collect();
    pool.into_iter().collect()
}

fn pick_four(rng: &mut StdRng, pool: &[MoveId]) -> [MoveId; 4] {
    let mut picked = [0; 4];
    if pool.len() < 4 {
        picked[..pool.len()].copy_from_slice(pool);
    } else {
        for (slot, &move_id) in picked.iter_mut().zip(pool.choose_multiple(rng, 4)) {
            *slot = move_id;
        }
    }
    picked
}

/// Builds a moveset for a trainer-owned Pokémon of `species` at `level`.
pub(crate) fn assign_moveset(
    data: &DataSnapshot,
    memo: &mut BTreeMap<SpeciesId, Vec<MoveId>>,
    rng: &mut StdRng,
    species: &SpeciesData,
    level: u8,
) -> [MoveId; 4] {
    let tm_hm_pool: &[MoveId] = memo
        .entry(species.species_id)
        .or_insert_with(|| tm_hm_movepool(data, species));

    let level_up_pool: Vec<MoveId> = species
        .learnset
        .iter()
        .filter(|m| m.move_id != 0 && m.level <= level)
        .map(|m| m.move_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let level_up = pick_four(rng, &level_up_pool);
    let mut tm_hm = pick_four(rng, tm_hm_pool);
    if tm_hm_pool.len() < 4 {
        tm_hm.reverse();
    }

    let mut moves = [0; 4];
    for (slot, (level_up_move, tm_hm_move)) in moves.iter_mut().zip(level_up.into_iter().zip(tm_hm)) {
        let roll: f64 = rng.gen();
        *slot = if tm_hm_move != 0 && (roll < TM_HM_MOVE_CHANCE || level_up_move == 0) {
            tm_hm_move
        } else {
            level_up_move
        };
    }
    moves
}
