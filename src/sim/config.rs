//! Configuration types for a simulation run.

use serde::{Deserialize, Serialize};

use crate::blockchain::{
    DEFAULT_EMA_SPACING_TARGET, DEFAULT_EMA_WINDOW_SIZE, DEFAULT_MAX_TARGET_HEX,
    DEFAULT_NUM_BLOCKS, RetargetParams, parse_target_hex,
};
use crate::error::ConfigError;
use crate::hive::{
    DEFAULT_BEE_ADD_CHANCE, DEFAULT_BEE_ADD_QUANT, DEFAULT_BEE_LIFESPAN_BLOCKS,
    DEFAULT_BEE_MATURATION_BLOCKS, Lifecycle, MAX_BEES_PER_SPAWN,
};

/// Raw, unvalidated run parameters as they arrive from a caller.
///
/// Numbers are signed so that negative input can be reported precisely
/// instead of failing as a generic parse error. Missing fields take the
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    pub num_blocks: i64,
    /// Easiest target as a hex string; its digit count sets the hash width.
    pub max_target: String,
    pub bee_maturation_blocks: i64,
    pub bee_lifespan_blocks: i64,
    pub ema_window_size: i64,
    pub ema_spacing_target: i64,
    pub bee_add_chance: f64,
    pub bee_add_quant: i64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            num_blocks: DEFAULT_NUM_BLOCKS,
            max_target: DEFAULT_MAX_TARGET_HEX.to_string(),
            bee_maturation_blocks: DEFAULT_BEE_MATURATION_BLOCKS,
            bee_lifespan_blocks: DEFAULT_BEE_LIFESPAN_BLOCKS,
            ema_window_size: DEFAULT_EMA_WINDOW_SIZE,
            ema_spacing_target: DEFAULT_EMA_SPACING_TARGET,
            bee_add_chance: DEFAULT_BEE_ADD_CHANCE,
            bee_add_quant: DEFAULT_BEE_ADD_QUANT,
        }
    }
}

impl SimParams {
    pub fn with_num_blocks(mut self, num_blocks: i64) -> Self {
        self.num_blocks = num_blocks;
        self
    }

    pub fn with_max_target(mut self, max_target: impl Into<String>) -> Self {
        self.max_target = max_target.into();
        self
    }

    pub fn with_lifecycle(mut self, maturation_blocks: i64, lifespan_blocks: i64) -> Self {
        self.bee_maturation_blocks = maturation_blocks;
        self.bee_lifespan_blocks = lifespan_blocks;
        self
    }

    pub fn with_ema(mut self, window_size: i64, spacing_target: i64) -> Self {
        self.ema_window_size = window_size;
        self.ema_spacing_target = spacing_target;
        self
    }

    pub fn with_bee_spawning(mut self, add_chance: f64, add_quant: i64) -> Self {
        self.bee_add_chance = add_chance;
        self.bee_add_quant = add_quant;
        self
    }

    /// Check every field and build a [`SimConfig`]. Nothing is applied on error.
    pub fn validate(&self) -> Result<SimConfig, ConfigError> {
        let num_blocks = positive("num_blocks", self.num_blocks)?;
        let (max_target, hex_width) = parse_target_hex(&self.max_target)?;
        let maturation_blocks = non_negative("bee_maturation_blocks", self.bee_maturation_blocks)?;
        let lifespan_blocks = non_negative("bee_lifespan_blocks", self.bee_lifespan_blocks)?;
        let ema_window_size = positive("ema_window_size", self.ema_window_size)?;
        let ema_spacing_target = positive("ema_spacing_target", self.ema_spacing_target)?;
        if !(0.0..=1.0).contains(&self.bee_add_chance) {
            return Err(ConfigError::ProbabilityOutOfRange {
                field: "bee_add_chance",
                value: self.bee_add_chance,
            });
        }
        let bee_add_quant = non_negative("bee_add_quant", self.bee_add_quant)?;
        if bee_add_quant > MAX_BEES_PER_SPAWN {
            return Err(ConfigError::TooLarge {
                field: "bee_add_quant",
                value: bee_add_quant,
                max: MAX_BEES_PER_SPAWN,
            });
        }

        Ok(SimConfig {
            num_blocks,
            hex_width,
            hash_bits: hex_width as u64 * 4,
            retarget: RetargetParams {
                max_target,
                ema_window_size,
                ema_spacing_target,
            },
            lifecycle: Lifecycle {
                maturation_blocks,
                lifespan_blocks,
            },
            bee_add_chance: self.bee_add_chance,
            bee_add_quant,
        })
    }
}

fn positive(field: &'static str, value: i64) -> Result<u64, ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(value as u64)
}

fn non_negative(field: &'static str, value: i64) -> Result<u64, ConfigError> {
    u64::try_from(value).map_err(|_| ConfigError::Negative { field, value })
}

/// A validated run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub num_blocks: u64,
    /// Hex digits of the max target; targets are printed at this width.
    pub hex_width: usize,
    /// Bit-width of each simulated bee hash.
    pub hash_bits: u64,
    pub retarget: RetargetParams,
    pub lifecycle: Lifecycle,
    pub bee_add_chance: f64,
    pub bee_add_quant: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimParams::default()
            .validate()
            .expect("built-in simulation defaults are valid")
    }
}
