pub mod vehicle_routes;
pub mod view_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Todas las rutas de la API, montadas bajo `/api`
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(vehicle_routes::create_vehicle_router())
        .merge(view_routes::create_view_router())
}

/// Router completo con health check
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", create_api_router())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": "lava-rapido",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
