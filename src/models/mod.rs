//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del dominio.

pub mod vehicle;
