//! Modelo de Vehicle
//!
//! Este módulo contiene el registro de vehículo del lava-rápido, el catálogo
//! cerrado de servicios y la entrada que recibe el store para crear registros.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Servicios ofrecidos - las etiquetas son las que ve el cliente y las que
/// se guardan en la columna `servico`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ServiceType {
    #[serde(rename = "Lavagem Simples")]
    LavagemSimples,
    #[serde(rename = "Lavagem Completa")]
    LavagemCompleta,
    #[serde(rename = "Polimento")]
    Polimento,
    #[serde(rename = "Enceramento")]
    Enceramento,
    #[serde(rename = "Lavagem + Enceramento")]
    LavagemEnceramento,
    #[serde(rename = "Lavagem + Polimento")]
    LavagemPolimento,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        ServiceType::LavagemSimples,
        ServiceType::LavagemCompleta,
        ServiceType::Polimento,
        ServiceType::Enceramento,
        ServiceType::LavagemEnceramento,
        ServiceType::LavagemPolimento,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::LavagemSimples => "Lavagem Simples",
            ServiceType::LavagemCompleta => "Lavagem Completa",
            ServiceType::Polimento => "Polimento",
            ServiceType::Enceramento => "Enceramento",
            ServiceType::LavagemEnceramento => "Lavagem + Enceramento",
            ServiceType::LavagemPolimento => "Lavagem + Polimento",
        }
    }

    /// Etiquetas en el orden en que se ofrecen en el formulario
    pub fn options() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.label()).collect()
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service type '{0}'")]
pub struct UnknownServiceType(pub String);

impl FromStr for ServiceType {
    type Err = UnknownServiceType;

    /// Coincidencia exacta con la etiqueta
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|service| service.label() == s)
            .ok_or_else(|| UnknownServiceType(s.to_string()))
    }
}

/// Vehicle principal - un paso de un vehículo por el lava-rápido
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub model: String,
    pub owner_name: String,
    pub contact: String,
    pub service_type: ServiceType,
    pub parking_fee: Option<Decimal>,
    pub entry_timestamp: NaiveDateTime,
    pub exit_timestamp: Option<NaiveDateTime>,
}

impl Vehicle {
    /// En servicio mientras no tenga hora de salida
    pub fn is_in_service(&self) -> bool {
        self.exit_timestamp.is_none()
    }

    pub fn is_completed(&self) -> bool {
        self.exit_timestamp.is_some()
    }

    /// Fecha de calendario (hora local) de la salida
    pub fn exit_date(&self) -> Option<NaiveDate> {
        self.exit_timestamp.map(|exit| exit.date())
    }

    pub fn entry_date(&self) -> NaiveDate {
        self.entry_timestamp.date()
    }

    pub fn fee_or_zero(&self) -> Decimal {
        self.parking_fee.unwrap_or(Decimal::ZERO)
    }
}

/// Entrada para crear un vehículo en el store.
///
/// La tarifa llega como texto tal cual la escribió el operador; el store la
/// normaliza. `entry_timestamp = None` significa "ahora".
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub plate: String,
    pub model: String,
    pub owner_name: String,
    pub contact: String,
    pub service_type: ServiceType,
    pub parking_fee: String,
    pub entry_timestamp: Option<NaiveDateTime>,
}
