use actix_web::{HttpResponse, Responder, post, web};
use log::{info, warn};
use std::time::Instant;
use uuid::Uuid;

use super::models::{
    AddBeesRequest, AddBeesResponse, AppState, BlockRow, ResetResponse, SimulateResponse,
};
use crate::error::ConfigError;
use crate::sim::{SimParams, TelemetryLog};

/// Run the next chunk of blocks on the shared simulation.
/// Invalid parameters are rejected before anything is touched.
#[post("/simulate/")]
pub async fn post_simulate(
    state: web::Data<AppState>,
    body: web::Json<SimParams>,
) -> impl Responder {
    let t0 = Instant::now();
    let config = match body.validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("POST /simulate/ - rejected: {e}");
            return HttpResponse::BadRequest().body(e.to_string());
        }
    };

    let mut log = TelemetryLog::new();
    let (summary, blocks) = {
        let mut sim = state.simulation.lock().expect("mutex poisoned");
        let summary = sim.simulate(&config, &mut log);
        let blocks = log
            .samples
            .iter()
            .map(|s| {
                let block = sim.ledger().block(s.height);
                BlockRow {
                    height: s.height,
                    bee_hash_target: block.target_hex(config.hex_width),
                    difficulty: s.difficulty.to_string(),
                    hive_mined: block.is_hive_mined,
                    solvers: if block.is_hive_mined {
                        s.extra_solvers + 1
                    } else {
                        0
                    },
                    live_bees: s.live_bees,
                    extra_solvers: s.extra_solvers,
                }
            })
            .collect::<Vec<_>>();
        (summary, blocks)
    };

    *state.config.lock().expect("mutex poisoned") = config;

    let run_id = Uuid::new_v4().to_string();
    info!(
        "POST /simulate/ - run {} produced {} blocks, height now {} ({} ms)",
        run_id,
        blocks.len(),
        summary.chain_height,
        t0.elapsed().as_millis()
    );

    HttpResponse::Ok().json(SimulateResponse {
        run_id,
        finished_at: chrono::Utc::now().timestamp(),
        blocks,
        report: summary.to_string(),
        summary,
    })
}

/// Clear chain, bees and counters.
#[post("/reset/")]
pub async fn post_reset(state: web::Data<AppState>) -> impl Responder {
    let mut sim = state.simulation.lock().expect("mutex poisoned");
    sim.reset();
    info!("POST /reset/ - simulation cleared");
    HttpResponse::Ok().json(ResetResponse {
        height: sim.height(),
        live_bees: sim.bees().live_count(),
    })
}

/// Inject bees at the current height.
#[post("/bees/")]
pub async fn post_bees(
    state: web::Data<AppState>,
    body: web::Json<AddBeesRequest>,
) -> impl Responder {
    let count = match u64::try_from(body.count) {
        Ok(n) => n,
        Err(_) => {
            let e = ConfigError::Negative {
                field: "count",
                value: body.count,
            };
            warn!("POST /bees/ - rejected: {e}");
            return HttpResponse::BadRequest().body(e.to_string());
        }
    };

    let mut sim = state.simulation.lock().expect("mutex poisoned");
    if let Err(e) = sim.spawn_bees(count) {
        warn!("POST /bees/ - rejected: {e}");
        return HttpResponse::BadRequest().body(e.to_string());
    }
    info!(
        "POST /bees/ - added {} bees at height {} (live {})",
        count,
        sim.height(),
        sim.bees().live_count()
    );

    HttpResponse::Ok().json(AddBeesResponse {
        added: count,
        born_at: sim.height(),
        live_bees: sim.bees().live_count(),
        total_bees_spawned: sim.bees().total_spawned(),
    })
}
