//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de los textos del formulario a tipos.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use validator::ValidationError;

use crate::models::vehicle::ServiceType;

/// Formato de `datetime-local` que usa el formulario
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir la hora de entrada (`YYYY-MM-DDTHH:MM`, segundos opcionales)
pub fn validate_datetime_local(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = value.trim();
    NaiveDateTime::parse_from_str(trimmed, DATETIME_LOCAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| {
            let mut error = ValidationError::new("datetime");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DDTHH:MM".to_string());
            error
        })
}

/// Casas decimales de la columna `NUMERIC(10, 2)`
pub const FEE_SCALE: u32 = 2;

/// Mayor tarifa que cabe en `NUMERIC(10, 2)`: 99999999.99
pub const MAX_FEE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, FEE_SCALE);

/// Validar que la tarifa sea un decimal no negativo que quepa en la columna
pub fn validate_fee(value: &str) -> Result<Decimal, ValidationError> {
    let mut parsed = Decimal::from_str(value.trim()).map_err(|_| {
        let mut error = ValidationError::new("decimal");
        error.add_param("value".into(), &value.to_string());
        error
    })?;

    if parsed < Decimal::ZERO {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    if parsed.normalize().scale() > FEE_SCALE {
        let mut error = ValidationError::new("scale");
        error.add_param("value".into(), &value.to_string());
        error.add_param("max_decimals".into(), &FEE_SCALE);
        return Err(error);
    }
    if parsed > MAX_FEE {
        let mut error = ValidationError::new("range");
        error.add_param("value".into(), &value.to_string());
        error.add_param("max".into(), &MAX_FEE.to_string());
        return Err(error);
    }

    // "-0" llega con signo negativo
    parsed.set_sign_positive(true);
    if parsed.scale() > FEE_SCALE {
        parsed.rescale(FEE_SCALE);
    }
    Ok(parsed)
}

/// Normalizar la tarifa: vacía, ilegible o negativa queda ausente
pub fn normalize_fee(value: &str) -> Option<Decimal> {
    if value.trim().is_empty() {
        return None;
    }
    validate_fee(value).ok()
}

/// Validar que el servicio sea uno de los ofrecidos
pub fn validate_service_type(value: &str) -> Result<ServiceType, ValidationError> {
    ServiceType::from_str(value).map_err(|_| {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value.to_string());
        error.add_param("allowed_values".into(), &format!("{:?}", ServiceType::options()));
        error
    })
}

/// Placa en mayúsculas, sin espacios en los extremos
pub fn normalize_plate(value: &str) -> String {
    value.trim().to_uppercase()
}
