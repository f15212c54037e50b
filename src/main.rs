use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::env;

use hive_sim::api::{self, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let seed: Option<u64> = env::var("SIM_SEED").ok().and_then(|v| v.parse().ok());

    let state = match seed {
        Some(seed) => {
            info!("simulation seeded with {seed}");
            web::Data::new(AppState::seeded(seed))
        }
        None => web::Data::new(AppState::default()),
    };

    println!("🐝 Starting hive simulator API at http://{host}:{port}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
