#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the Vancouver crime map.
//!
//! Serves the REST API for querying prepared incident data as GeoJSON,
//! plus the static front-end entry document. The source CSV is reloaded
//! and reprocessed on every request, so concurrent requests share no
//! mutable state.

mod handlers;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};

/// Shared application state.
pub struct AppState {
    /// Path to the source incident CSV.
    pub csv_path: PathBuf,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let csv_path = van_crime_dataset::csv_path();
    log::info!("Serving incidents from {}", csv_path.display());

    let state = web::Data::new(AppState { csv_path });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .route("/data", web::get().to(handlers::data))
            .route("/neighbourhoods", web::get().to(handlers::neighbourhoods))
            .route("/types", web::get().to(handlers::types))
            .route("/date_meta", web::get().to(handlers::date_meta))
            .route("/health", web::get().to(handlers::health))
            // Serve the front-end entry document
            .service(Files::new("/", "static").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
