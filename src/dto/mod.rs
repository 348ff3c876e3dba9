//! Objetos de entrada y salida de la API

pub mod vehicle_dto;
