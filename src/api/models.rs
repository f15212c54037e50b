use crate::sim::{RunSummary, SimConfig, Simulation};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Shared application state: one simulation plus the configuration of its
/// most recent run, used to render targets and compute the next one.
pub struct AppState {
    pub simulation: Mutex<Simulation>,
    pub config: Mutex<SimConfig>,
}

impl AppState {
    /// State whose simulation is seeded for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            simulation: Mutex::new(Simulation::seeded(seed)),
            config: Mutex::new(SimConfig::default()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            simulation: Mutex::new(Simulation::new()),
            config: Mutex::new(SimConfig::default()),
        }
    }
}

/* ---------- Simulation API Models ---------- */

#[derive(Serialize)]
pub struct BlockRow {
    pub height: u64,
    pub bee_hash_target: String,
    pub difficulty: String,
    pub hive_mined: bool,
    pub solvers: u32,
    pub live_bees: usize,
    pub extra_solvers: u32,
}

#[derive(Serialize)]
pub struct SimulateResponse {
    pub run_id: String,
    pub finished_at: i64,
    pub blocks: Vec<BlockRow>,
    pub summary: RunSummary,
    pub report: String,
}

#[derive(Deserialize)]
pub struct AddBeesRequest {
    pub count: i64,
}

#[derive(Serialize)]
pub struct AddBeesResponse {
    pub added: u64,
    pub born_at: u64,
    pub live_bees: usize,
    pub total_bees_spawned: u64,
}

#[derive(Serialize)]
pub struct ResetResponse {
    pub height: u64,
    pub live_bees: usize,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainBlock {
    pub height: u64,
    pub bee_hash_target: String,
    pub hive_mined: bool,
}

#[derive(Serialize)]
pub struct ChainResponse {
    pub length: usize,
    pub chain: Vec<ChainBlock>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub height: u64,
    pub hive_mined_blocks: u64,
    pub total_bees_spawned: u64,
    pub live_bees: usize,
    pub active_bees: usize,
    pub next_bee_hash_target: String,
    pub next_difficulty: String,
    pub summary: RunSummary,
}
