use num_bigint::BigUint;

use super::target::format_target;

/// A single block in the simulated chain.
///
/// Every block carries a bee hash target, PoW blocks included, even though
/// only hive blocks are solved against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub height: u64,
    pub bee_hash_target: BigUint,
    pub is_hive_mined: bool,
}

impl Block {
    /// Create a block record. Records are immutable once appended to a ledger.
    pub fn new(height: u64, bee_hash_target: BigUint, is_hive_mined: bool) -> Self {
        Self {
            height,
            bee_hash_target,
            is_hive_mined,
        }
    }

    /// Short block type label used in logs and API rows.
    pub fn kind(&self) -> &'static str {
        if self.is_hive_mined { "Hive" } else { "PoW" }
    }

    /// Target as fixed-width lowercase hex.
    pub fn target_hex(&self, hex_width: usize) -> String {
        format_target(&self.bee_hash_target, hex_width)
    }
}
