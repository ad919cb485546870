//! StayMarket reservations API.
//!
//! HTTP/JSON service for a vacation-rental marketplace: listing browsing,
//! per-listing availability, stay-price quotes, and reservation creation.

pub mod auth;
pub mod booking;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use sqlx::PgPool;

use cache::{AppCache, CacheStats};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}

/// Build the full application router
pub fn app_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::listings::router())
        .merge(booking::router())
        .route("/health", get(health));

    Router::new().nest("/api", api).with_state(state)
}

/// Liveness + cache stats
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    cache: CacheStats,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.cache.stats(),
    })
}
