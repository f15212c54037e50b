use log::{debug, info, warn};
use num_bigint::BigUint;
use rand::distributions::{Distribution, Standard};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{RunSummary, SimConfig, TelemetrySink};
use crate::blockchain::{BlockLedger, difficulty, format_target, next_bee_hash_target};
use crate::error::ConfigError;
use crate::hive::{BeePool, attempt_hive_solve};

/// What happened while producing one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    pub height: u64,
    pub bee_hash_target: BigUint,
    pub solvers: u32,
    pub bees_spawned: u64,
}

impl BlockOutcome {
    pub fn is_hive_mined(&self) -> bool {
        self.solvers > 0
    }

    pub fn extra_solvers(&self) -> u32 {
        self.solvers.saturating_sub(1)
    }
}

/// Chain and bee population for one independent simulation.
///
/// All randomness (spawn rolls and simulated bee hashes) comes from `rng`,
/// so a seeded generator makes runs reproducible.
#[derive(Debug, Clone)]
pub struct Simulation<R = ChaCha8Rng> {
    ledger: BlockLedger,
    bees: BeePool,
    hive_mined_blocks: u64,
    rng: R,
}

impl Simulation<ChaCha8Rng> {
    /// Simulation seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Reproducible simulation.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for Simulation<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Simulation<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            ledger: BlockLedger::new(),
            bees: BeePool::new(),
            hive_mined_blocks: 0,
            rng,
        }
    }

    /// Height of the next block to be simulated.
    pub fn height(&self) -> u64 {
        self.ledger.height()
    }

    pub fn ledger(&self) -> &BlockLedger {
        &self.ledger
    }

    pub fn bees(&self) -> &BeePool {
        &self.bees
    }

    pub fn hive_mined_blocks(&self) -> u64 {
        self.hive_mined_blocks
    }

    /// Clear chain, bees and counters. The random source is kept.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.bees.clear();
        self.hive_mined_blocks = 0;
    }

    /// Add `count` bees born at the current height. Nothing changes when the
    /// count is refused.
    pub fn spawn_bees(&mut self, count: u64) -> Result<(), ConfigError> {
        let height = self.height();
        self.bees.spawn(count, height)?;
        debug!("spawned {count} bees at height {height}");
        Ok(())
    }

    /// Target the next block would get under `config`.
    pub fn next_target(&self, config: &SimConfig) -> BigUint {
        next_bee_hash_target(&self.ledger, self.height(), &config.retarget)
    }

    /// Totals so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary::new(
            self.height(),
            self.bees.total_spawned(),
            self.hive_mined_blocks,
        )
    }

    /// Simulate `config.num_blocks` further blocks, reporting each one to
    /// `telemetry`, and return the cumulative totals.
    pub fn simulate<T>(&mut self, config: &SimConfig, telemetry: &mut T) -> RunSummary
    where
        T: TelemetrySink + ?Sized,
    {
        info!(
            "simulating {} blocks from height {} ({} live bees)",
            config.num_blocks,
            self.height(),
            self.bees.live_count()
        );
        for _ in 0..config.num_blocks {
            self.step(config, telemetry);
        }
        let summary = self.summary();
        info!(
            "run finished at height {}: {} hive mined, {} bees spawned",
            summary.chain_height, summary.hive_mined_blocks, summary.total_bees_spawned
        );
        summary
    }

    /// Produce a single block.
    pub fn step<T>(&mut self, config: &SimConfig, telemetry: &mut T) -> BlockOutcome
    where
        T: TelemetrySink + ?Sized,
    {
        let height = self.height();
        let target = self.next_target(config);

        // Hive mining never happens twice in a row.
        let after_hive_block = height == 0 || self.ledger.block(height - 1).is_hive_mined;
        let solvers = if after_hive_block {
            0
        } else {
            attempt_hive_solve(
                &target,
                height,
                &mut self.bees,
                &config.lifecycle,
                config.hash_bits,
                &mut self.rng,
            )
        };

        let is_hive_mined = solvers > 0;
        if is_hive_mined {
            self.hive_mined_blocks += 1;
        }
        self.ledger.append(target.clone(), is_hive_mined);

        let rolled = self.roll_new_bees(config);
        let bees_spawned = match self.bees.spawn(rolled, height) {
            Ok(()) => rolled,
            Err(err) => {
                warn!("height {height}: skipped spawning {rolled} bees: {err}");
                0
            }
        };

        let outcome = BlockOutcome {
            height,
            bee_hash_target: target,
            solvers,
            bees_spawned,
        };
        let diff = difficulty(&config.retarget.max_target, &outcome.bee_hash_target);
        let live_bees = self.bees.live_count();
        debug!(
            "{}\t{}\t{}\t{} ({})",
            height,
            live_bees,
            if is_hive_mined {
                format!("Hive: {solvers} bees")
            } else {
                "PoW".to_string()
            },
            format_target(&outcome.bee_hash_target, config.hex_width),
            diff
        );
        telemetry.record(height, &diff, live_bees, outcome.extra_solvers());
        outcome
    }

    /// Spawn roll: with probability `bee_add_chance`, `round(u * bee_add_quant)`
    /// bees for `u` uniform in `[0, 1)`.
    fn roll_new_bees(&mut self, config: &SimConfig) -> u64 {
        if !self.rng.gen_bool(config.bee_add_chance) {
            return 0;
        }
        let u: f64 = Standard.sample(&mut self.rng);
        (u * config.bee_add_quant as f64).round() as u64
    }
}
