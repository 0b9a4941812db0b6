//! Rutas de la API
//!
//! Routers por área, anidados bajo /api.

pub mod auth_routes;
pub mod rental_routes;
pub mod staff_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/rentals", rental_routes::create_rental_router())
        .nest("/api/staff", staff_routes::create_staff_router())
        .layer(cors_middleware())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "service": "vehicle-rental",
        "status": "healthy",
    }))
}
