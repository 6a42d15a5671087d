pub mod config;
pub mod derive;
pub mod enums;
pub mod errors;
pub mod gateway;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod page;
pub mod panels;
pub mod payload;
pub mod state;
pub mod validator;

#[cfg(test)]
pub(crate) mod testing;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::page).post(handlers::submit))
        .route("/reset", get(handlers::reset))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/api/shorten", post(handlers::api_shorten))
        .route("/api/trends", get(handlers::api_trends))
        .route("/api/timing", get(handlers::api_timing))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
