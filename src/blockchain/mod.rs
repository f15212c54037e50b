pub mod block;
pub mod model;
pub mod target;

pub use block::Block;
pub use model::BlockLedger;
pub use target::{
    RetargetParams, difficulty, format_target, next_bee_hash_target, parse_target_hex,
};

/// Blocks simulated per run when the caller does not say otherwise.
pub const DEFAULT_NUM_BLOCKS: i64 = 30;

/// Easiest bee hash target (128-bit space, top nibble clear).
pub const DEFAULT_MAX_TARGET_HEX: &str = "0fffffffffffffffffffffffffffffff";

/// EMA smoothing window, in blocks.
pub const DEFAULT_EMA_WINDOW_SIZE: i64 = 30;

/// Desired PoW blocks per hive block.
pub const DEFAULT_EMA_SPACING_TARGET: i64 = 2;
