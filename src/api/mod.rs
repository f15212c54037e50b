mod chain;
mod health;
pub mod models;
mod simulation;
mod stats;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(simulation::post_simulate)
            .service(simulation::post_reset)
            .service(simulation::post_bees)
            .service(chain::get_chain)
            .service(stats::get_stats),
    );
}
