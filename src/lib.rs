//! Lava Rápido - control de vehículos en servicio
//!
//! Registro de entrada, finalización de servicio, panel de vehículos en
//! servicio e historial de servicios finalizados.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Construir la aplicación con middleware y estado
pub fn build_app(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);
    routes::create_router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
