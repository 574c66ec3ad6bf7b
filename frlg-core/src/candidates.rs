use rand::{rngs::StdRng, seq::SliceRandom};
use std::collections::BTreeSet;

use crate::data::{SpeciesData, SpeciesId, TypeId};
use crate::{RandomizerError, Result};

/// Exclusion sets ordered by priority, index 0 first.
///
/// Tier 0 always applies. Lower-priority tiers are dropped, lowest first, when
/// keeping them would exclude the whole universe.
#[derive(Debug, Default)]
pub(crate) struct ExclusionTiers {
    tiers: Vec<BTreeSet<SpeciesId>>,
}

impl ExclusionTiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude(&mut self, priority: usize, ids: impl IntoIterator<Item = SpeciesId>) {
        if self.tiers.len() <= priority {
            self.tiers.resize_with(priority + 1, BTreeSet::new);
        }
        self.tiers[priority].extend(ids);
    }

    pub fn merged_for(&self, universe: &[&SpeciesData]) -> BTreeSet<SpeciesId> {
        let mut merged = BTreeSet::new();
        for max in (0..self.tiers.len()).rev() {
            merged = self.tiers[..=max].iter().flatten().copied().collect();
            let excluded = universe
                .iter()
                .filter(|s| merged.contains(&s.species_id))
                .count();
            if excluded < universe.len() {
                break;
            }
        }
        merged
    }
}

/// Ids of species sharing no type with `types`.
pub(crate) fn type_mismatches<'a>(
    universe: impl IntoIterator<Item = &'a SpeciesData>,
    types: (TypeId, TypeId),
) -> BTreeSet<SpeciesId> {
    universe
        .into_iter()
        .filter(|s| !s.shares_type_with(types))
        .map(|s| s.species_id)
        .collect()
}

/// Keeps the candidates whose base stat total is within the smallest 10% step of `target`.
pub(crate) fn filter_by_nearby_bst(mut candidates: Vec<&SpeciesData>, target: u32) -> Vec<&SpeciesData> {
    const MAX_PERCENT: u64 = 10_000;

    let distance = |s: &SpeciesData| u64::from(s.base_stats.total().abs_diff(target));
    candidates.sort_by_key(|s| distance(s));

    let mut percent = 10u64;
    while percent < MAX_PERCENT {
        let cutoff = candidates
            .iter()
            .take_while(|s| distance(s) * 100 < u64::from(target) * percent)
            .count();
        if cutoff > 0 {
            candidates.truncate(cutoff);
            return candidates;
        }
        percent += 10;
    }

    // Only reachable for a zero target; keep everything at the minimum distance.
    if let Some(best) = candidates.first().map(|s| distance(s)) {
        candidates.retain(|s| distance(s) == best);
    }
    candidates
}

/// Picks one species from `universe` honoring the tiers and the optional stat target.
pub(crate) fn select_species(
    universe: &[&SpeciesData],
    tiers: &ExclusionTiers,
    target_bst: Option<u32>,
    rng: &mut StdRng,
    context: &str,
) -> Result<SpeciesId> {
    let excluded = tiers.merged_for(universe);
    let mut candidates: Vec<&SpeciesData> = universe
        .iter()
        .copied()
        .filter(|s| !excluded.contains(&s.species_id))
        .collect();
    if let Some(target) = target_bst {
        candidates = filter_by_nearby_bst(candidates, target);
    }

    candidates
        .choose(rng)
        .map(|s| s.species_id)
        .ok_or_else(|| RandomizerError::DegenerateUniverse {
            context: context.to_string(),
        })
}
