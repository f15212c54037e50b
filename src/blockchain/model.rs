use num_bigint::BigUint;

use super::Block;

/// Append-only in-memory ledger of simulated blocks.
///
/// Heights are contiguous and start at zero: the block at index `i` always has
/// `height == i`.
#[derive(Debug, Default, Clone)]
pub struct BlockLedger {
    chain: Vec<Block>,
}

impl BlockLedger {
    pub fn new() -> Self {
        Self { chain: Vec::new() }
    }

    /// Height the next appended block will get.
    pub fn height(&self) -> u64 {
        self.chain.len() as u64
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Append a block at the current tip and return a reference to it.
    pub fn append(&mut self, bee_hash_target: BigUint, is_hive_mined: bool) -> &Block {
        let height = self.height();
        self.chain
            .push(Block::new(height, bee_hash_target, is_hive_mined));
        self.last_block()
            .expect("ledger cannot be empty right after an append")
    }

    pub fn get(&self, height: u64) -> Option<&Block> {
        usize::try_from(height).ok().and_then(|i| self.chain.get(i))
    }

    /// Block at `height`, which must already exist. A miss means the caller
    /// walked past the tip, which is a bookkeeping bug rather than user error.
    pub fn block(&self, height: u64) -> &Block {
        self.get(height).unwrap_or_else(|| {
            panic!(
                "ledger gap: height {} requested but tip is {}",
                height,
                self.height()
            )
        })
    }

    pub fn last_block(&self) -> Option<&Block> {
        self.chain.last()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn hive_mined_count(&self) -> usize {
        self.chain.iter().filter(|b| b.is_hive_mined).count()
    }

    /// Drop every block, returning to an empty chain.
    pub fn clear(&mut self) {
        self.chain.clear();
    }
}
