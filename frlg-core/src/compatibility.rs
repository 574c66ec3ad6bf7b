use rand::{rngs::StdRng, Rng};
use std::ops::Range;

use crate::options::Compatibility;
use crate::tables::{HM_COUNT, TM_COUNT};
use crate::RandomizationContext;

fn reroll_bits(rng: &mut StdRng, bits: u64, range: Range<usize>, percent: u8) -> u64 {
    let chance = f64::from(percent) / 100.0;
    let mut bits = bits;
    for bit in range {
        if rng.gen::<f64>() < chance {
            bits |= 1 << bit;
        } else {
            bits &= !(1 << bit);
        }
    }
    bits
}

pub(crate) fn randomize_tm_hm_compatibility(ctx: &mut RandomizationContext) {
    let tm = ctx.settings.tm_tutor_compatibility;
    let hm = ctx.settings.hm_compatibility;
    if tm == Compatibility::Vanilla && hm == Compatibility::Vanilla {
        return;
    }

    let RandomizationContext { rng, species, .. } = ctx;
    for s in species.values_mut() {
        if let Compatibility::Percent(percent) = tm {
            s.tm_hm_compatibility = reroll_bits(rng, s.tm_hm_compatibility, 0..TM_COUNT, percent);
        }
        if let Compatibility::Percent(percent) = hm {
            s.tm_hm_compatibility =
                reroll_bits(rng, s.tm_hm_compatibility, TM_COUNT..TM_COUNT + HM_COUNT, percent);
        }
    }

    log::info!("Randomized TM/HM compatibility (TM {tm:?}, HM {hm:?})");
}
