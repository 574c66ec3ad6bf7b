use rand::{rngs::StdRng, seq::SliceRandom};
use std::collections::BTreeSet;

use crate::data::{LearnsetMove, MoveId};
use crate::options::RandomizeMoves;
use crate::tables::{DAMAGING_MOVES, HM_MOVES, MOVE_BLACKLIST};
use crate::{RandomizationContext, RandomizerError, Result};

fn random_move(rng: &mut StdRng, legal: &[MoveId], exclude: &BTreeSet<MoveId>) -> Result<MoveId> {
    let allowed: Vec<MoveId> = legal.iter().copied().filter(|m| !exclude.contains(m)).collect();
    allowed.choose(rng).copied().ok_or_else(|| {
        RandomizerError::Config("no legal moves left after applying the move blacklist".to_string())
    })
}

fn random_damaging_move(rng: &mut StdRng, exclude: &BTreeSet<MoveId>) -> Result<MoveId> {
    random_move(rng, DAMAGING_MOVES, exclude)
}

pub(crate) fn randomize_moves(ctx: &mut RandomizationContext) -> Result<()> {
    let option = ctx.settings.moves;
    if option == RandomizeMoves::Vanilla {
        return Ok(());
    }

    let moves_count = ctx.data.constant("MOVES_COUNT")?;
    let legal: Vec<MoveId> = (0..moves_count)
        .filter_map(|id| MoveId::try_from(id).ok())
        .filter(|m| !HM_MOVES.contains(m) && !MOVE_BLACKLIST.contains(m))
        .collect();

    let RandomizationContext {
        rng,
        species,
        blacklists,
        ..
    } = ctx;

    for s in species.values_mut() {
        let old = &s.learnset;
        let mut new: Vec<LearnsetMove> = Vec::with_capacity(old.len());
        let used = |new: &[LearnsetMove]| -> BTreeSet<MoveId> {
            new.iter().map(|m| m.move_id).collect()
        };

        // Every species starts with four level 0 entries; up to three of them are empty.
        let mut index = 0;
        while index < old.len() && old[index].move_id == 0 {
            let move_id = if option == RandomizeMoves::StartWithFourMoves {
                let mut exclude = used(&new);
                exclude.extend(blacklists.moves.iter().copied());
                random_move(rng, &legal, &exclude)?
            } else {
                0
            };
            new.push(LearnsetMove {
                level: old[index].level,
                move_id,
            });
            index += 1;
        }

        while index < old.len() {
            let move_id = if index == 3 {
                random_damaging_move(rng, &used(&new))?
            } else {
                let mut exclude = used(&new);
                exclude.extend(blacklists.moves.iter().copied());
                random_move(rng, &legal, &exclude)?
            };
            new.push(LearnsetMove {
                level: old[index].level,
                move_id,
            });
            index += 1;
        }

        s.learnset = new;
    }

    log::info!("Randomized learnsets ({option:?})");
    Ok(())
}
