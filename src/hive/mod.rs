pub mod bee;
pub mod solver;

pub use bee::{Bee, BeePool, Lifecycle};
pub use solver::{HashSource, attempt_hive_solve};

/// Blocks a bee needs to mature.
pub const DEFAULT_BEE_MATURATION_BLOCKS: i64 = 576;

/// Blocks a bee lives after maturing.
pub const DEFAULT_BEE_LIFESPAN_BLOCKS: i64 = 576 * 7;

/// Per-block chance of new bees being spawned.
pub const DEFAULT_BEE_ADD_CHANCE: f64 = 0.05;

/// Scale of the random spawn count.
pub const DEFAULT_BEE_ADD_QUANT: i64 = 10;

/// Most bees a single spawn, random or injected, may add.
pub const MAX_BEES_PER_SPAWN: u64 = 1_000_000;
