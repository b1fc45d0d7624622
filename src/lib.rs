// src/lib.rs

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pivot;
pub mod routes;

use config::Config;
use db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            db: Database::new(&config.database_path),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Very permissive CORS for local dev (tighten for prod)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = &state.config.static_dir;
    let index = ServeFile::new(static_dir.join("index.html"));
    let dist = ServeDir::new(static_dir.join("dist"));

    Router::new()
        // health
        .route("/health", get(routes::health::health))
        // reporting api
        .route("/api/attributes", get(routes::attributes::list_attributes))
        .route("/api/chart", post(routes::chart::get_chart))
        // pre-built frontend
        .route_service("/", index)
        .nest_service("/dist", dist)
        // state & middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
