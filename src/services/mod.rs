//! Services module
//!
//! Este módulo contiene la lógica de negocio: el store de vehículos, las
//! vistas derivadas, el filtro del historial y la fuente de tiempo.

pub mod clock;
pub mod derived_views;
pub mod history_filter;
pub mod vehicle_store;
