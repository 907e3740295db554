/// Simulate command: plays a whole session with a scripted preference.
///
/// On each pair the side whose style is preferred wins; when both or neither
/// side is preferred, a coin flip decides. Useful for sanity checking a
/// manifest and seeing how fast the distribution concentrates.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use tastequiz_core::{Pair, Side, TasteError, TasteSession};

/// Pick a side for `pair` given the preferred styles.
pub fn scripted_pick(pair: &Pair, preferred: &HashSet<String>, rng: &mut impl Rng) -> Side {
    let left = preferred.contains(&pair.left.style);
    let right = preferred.contains(&pair.right.style);
    match (left, right) {
        (true, false) => Side::Left,
        (false, true) => Side::Right,
        _ => {
            if rng.random::<f64>() < 0.5 {
                Side::Left
            } else {
                Side::Right
            }
        }
    }
}

pub fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

/// Run `session` to completion. With `finish_early`, an advanced session stops
/// as soon as early finish becomes available.
pub fn run_simulation(
    session: &mut TasteSession,
    preferred: &HashSet<String>,
    finish_early: bool,
    rng: &mut SmallRng,
) -> Result<(), TasteError> {
    while !session.is_complete() {
        if finish_early && session.finish_early().is_ok() {
            break;
        }
        let pair = session.next_pair_with_rng(rng)?;
        let side = scripted_pick(pair, preferred, rng);
        let delta = session.apply_choice(side)?;
        tracing::debug!(q = session.choice_count(), "{delta}");
    }
    Ok(())
}
