//! Repositorios
//!
//! Acceso al almacén de registros externo.

pub mod vehicle_repository;
