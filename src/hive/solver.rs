use log::trace;
use num_bigint::{BigUint, RandBigInt};
use rand::RngCore;

use super::{BeePool, Lifecycle};

/// Source of simulated bee hashes.
///
/// Real bee hashes are replaced by uniform draws over the target's bit-width.
/// For a uniform hash function that is statistically the same thing: a draw
/// beats `target` with probability `target / 2^bits`.
pub trait HashSource {
    /// Uniform value in `[0, 2^bits)`.
    fn draw(&mut self, bits: u64) -> BigUint;
}

impl<R: RngCore + ?Sized> HashSource for R {
    fn draw(&mut self, bits: u64) -> BigUint {
        self.gen_biguint(bits)
    }
}

/// Let every mature bee try to beat `target` at `height`.
///
/// Bees flagged dead by the previous attempt are purged first. Bees past their
/// lifespan are flagged now and skipped; immature bees are skipped. Each
/// remaining bee makes one independent draw of `hash_bits` bits and counts as
/// a solver when the draw is strictly below `target`.
pub fn attempt_hive_solve<H: HashSource + ?Sized>(
    target: &BigUint,
    height: u64,
    pool: &mut BeePool,
    lifecycle: &Lifecycle,
    hash_bits: u64,
    hashes: &mut H,
) -> u32 {
    let purged = pool.purge_dead();
    if purged > 0 {
        trace!("height {height}: purged {purged} dead bees");
    }

    let mut solvers: u32 = 0;
    for bee in pool.iter_mut() {
        if bee.is_expired(height, lifecycle) {
            bee.mark_dead();
            continue;
        }
        if bee.is_immature(height, lifecycle) {
            continue;
        }
        if hashes.draw(hash_bits) < *target {
            solvers = solvers.saturating_add(1);
        }
    }
    solvers
}
