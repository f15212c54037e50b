use std::fmt;

use serde::Serialize;

/// End-of-run totals for a simulation.
///
/// Counters are cumulative across runs until the simulation is reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub chain_height: u64,
    pub total_bees_spawned: u64,
    pub hive_mined_blocks: u64,
    pub hive_mined_pct: f64,
    /// Hive-mined blocks per spawned bee; `None` until a bee has been spawned.
    pub blocks_per_bee: Option<f64>,
}

impl RunSummary {
    pub fn new(chain_height: u64, total_bees_spawned: u64, hive_mined_blocks: u64) -> Self {
        let hive_mined_pct = if chain_height > 0 {
            hive_mined_blocks as f64 / chain_height as f64 * 100.0
        } else {
            0.0
        };
        let blocks_per_bee =
            (total_bees_spawned > 0).then(|| hive_mined_blocks as f64 / total_bees_spawned as f64);
        Self {
            chain_height,
            total_bees_spawned,
            hive_mined_blocks,
            hive_mined_pct,
            blocks_per_bee,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total bees spawned: {} Hive mined blocks: {} ({:.2}% of all blocks)",
            self.total_bees_spawned, self.hive_mined_blocks, self.hive_mined_pct
        )?;
        match self.blocks_per_bee {
            Some(avg) => write!(f, "Average blocks found per bee: {avg:.4}"),
            None => write!(f, "Average blocks found per bee: n/a"),
        }
    }
}
