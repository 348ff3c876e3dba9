//! Middleware del servidor

pub mod cors;
