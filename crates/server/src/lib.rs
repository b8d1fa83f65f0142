//! WebSocket gateway for Market Mole.
//!
//! Thin actix-web shell around the room session engine: one `/ws`
//! endpoint upgrades each client to a WebSocket and bridges it into the
//! shared [`Lobby`], which owns the engine and performs unicast and
//! room-scoped delivery.
//!
//! ## Submodules
//!
//! - [`handlers`] — HTTP route handlers (`/ws` upgrade, `/health`)
//! - [`Lobby`] — connection table, room subscriptions, bridge tasks

pub mod handlers;
mod lobby;

pub use lobby::Lobby;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;

/// Binds BIND_ADDR (default 127.0.0.1:3000) and serves the gateway.
pub async fn run() -> Result<(), std::io::Error> {
    let lobby = web::Data::new(Lobby::new());
    log::info!("starting gateway");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(lobby.clone())
            .route("/health", web::get().to(handlers::health))
            .route("/ws", web::get().to(handlers::enter))
    })
    .bind(std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string()))?
    .run()
    .await
}
