use super::MAX_BEES_PER_SPAWN;
use crate::error::ConfigError;

/// Maturation and lifespan windows shared by every bee in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    /// Blocks a bee needs before it may attempt solves.
    pub maturation_blocks: u64,
    /// Blocks a bee stays active after maturing.
    pub lifespan_blocks: u64,
}

impl Lifecycle {
    /// Last height at which a bee born at `born_at` may still solve.
    pub fn last_active_height(&self, born_at: u64) -> u64 {
        born_at
            .saturating_add(self.maturation_blocks)
            .saturating_add(self.lifespan_blocks)
    }
}

/// A simulated hive participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bee {
    born_at: u64,
    dead: bool,
}

impl Bee {
    pub fn new(born_at: u64) -> Self {
        Self {
            born_at,
            dead: false,
        }
    }

    pub fn born_at(&self) -> u64 {
        self.born_at
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Past its lifespan at `height`.
    pub fn is_expired(&self, height: u64, lifecycle: &Lifecycle) -> bool {
        height > lifecycle.last_active_height(self.born_at)
    }

    /// Still maturing at `height`. Bees queried before their birth height
    /// count as immature.
    pub fn is_immature(&self, height: u64, lifecycle: &Lifecycle) -> bool {
        height.saturating_sub(self.born_at) < lifecycle.maturation_blocks || height < self.born_at
    }

    /// Eligible to attempt a solve at `height`.
    pub fn is_active(&self, height: u64, lifecycle: &Lifecycle) -> bool {
        !self.dead && !self.is_expired(height, lifecycle) && !self.is_immature(height, lifecycle)
    }

    /// Flag for removal on the next purge. Irreversible.
    pub fn mark_dead(&mut self) {
        self.dead = true;
    }
}

/// Live bee population plus the all-time spawn counter.
///
/// Expired bees are only flagged during a solve attempt and physically
/// removed by the next [`BeePool::purge_dead`], so `live_count` includes
/// flagged bees until then.
#[derive(Debug, Default, Clone)]
pub struct BeePool {
    bees: Vec<Bee>,
    total_spawned: u64,
}

impl BeePool {
    pub fn new() -> Self {
        Self {
            bees: Vec::new(),
            total_spawned: 0,
        }
    }

    /// Add `count` bees born at `at_height`. The pool is left untouched when
    /// `count` exceeds [`MAX_BEES_PER_SPAWN`] or memory cannot be reserved.
    pub fn spawn(&mut self, count: u64, at_height: u64) -> Result<(), ConfigError> {
        if count > MAX_BEES_PER_SPAWN {
            return Err(ConfigError::TooLarge {
                field: "count",
                value: count,
                max: MAX_BEES_PER_SPAWN,
            });
        }
        let additional = count as usize;
        self.bees
            .try_reserve(additional)
            .map_err(|source| ConfigError::BeeAllocation { count, source })?;
        self.bees
            .extend(std::iter::repeat_with(|| Bee::new(at_height)).take(additional));
        self.total_spawned = self.total_spawned.saturating_add(count);
        Ok(())
    }

    /// Bees not yet purged.
    pub fn live_count(&self) -> usize {
        self.bees.len()
    }

    /// Bees able to solve at `height`.
    pub fn active_count(&self, height: u64, lifecycle: &Lifecycle) -> usize {
        self.bees
            .iter()
            .filter(|b| b.is_active(height, lifecycle))
            .count()
    }

    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    /// Remove every bee flagged dead; returns how many were removed.
    pub fn purge_dead(&mut self) -> usize {
        let before = self.bees.len();
        self.bees.retain(|b| !b.is_dead());
        before - self.bees.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bee> {
        self.bees.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bee> {
        self.bees.iter_mut()
    }

    /// Drop all bees and zero the spawn counter.
    pub fn clear(&mut self) {
        self.bees.clear();
        self.total_spawned = 0;
    }
}
