use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};
use crate::blockchain::{difficulty, format_target};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    // Config of the latest run decides hex width, lifecycle and retarget inputs
    let config = state.config.lock().expect("mutex poisoned").clone();

    let sim = state.simulation.lock().expect("mutex poisoned");
    let height = sim.height();
    let next_target = sim.next_target(&config);

    HttpResponse::Ok().json(StatsResponse {
        height,
        hive_mined_blocks: sim.hive_mined_blocks(),
        total_bees_spawned: sim.bees().total_spawned(),
        live_bees: sim.bees().live_count(),
        active_bees: sim.bees().active_count(height, &config.lifecycle),
        next_bee_hash_target: format_target(&next_target, config.hex_width),
        next_difficulty: difficulty(&config.retarget.max_target, &next_target).to_string(),
        summary: sim.summary(),
    })
}
