mod api;
mod blockchain;
mod config;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use api::AppState;
use config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let cfg = Config::from_env();
    info!(
        "node {} starting (difficulty={})",
        cfg.node_id, cfg.difficulty
    );
    println!("⛓️ Starting ledger node at http://{}:{}", cfg.host, cfg.port);

    let state = web::Data::new(AppState::new(cfg.difficulty, cfg.node_id.clone()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((cfg.host.as_str(), cfg.port))?
    .run()
    .await
}
