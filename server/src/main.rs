use actix_web::{App, HttpServer};
use clap::Parser;

use sketch_server::config::Config;
use sketch_server::handlers;
use sketch_server::server::spawn_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let srv_tx = spawn_server();

    log::info!("Listening on {}", config.bind);
    HttpServer::new(move || App::new().data(srv_tx.clone()).configure(handlers::root))
        .bind(&config.bind)?
        .run()
        .await
}
