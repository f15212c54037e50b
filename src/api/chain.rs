use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ChainBlock, ChainResponse};

/// Get the full simulated chain.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let hex_width = state.config.lock().expect("mutex poisoned").hex_width;
    let sim = state.simulation.lock().expect("mutex poisoned");
    let chain = sim
        .ledger()
        .blocks()
        .iter()
        .map(|b| ChainBlock {
            height: b.height,
            bee_hash_target: b.target_hex(hex_width),
            hive_mined: b.is_hive_mined,
        })
        .collect::<Vec<_>>();
    HttpResponse::Ok().json(ChainResponse {
        length: chain.len(),
        chain,
    })
}
