use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::{ServiceType, Vehicle};
use crate::services::history_filter::HistoryFilter;
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::{validate_date, validate_service_type};

// Borrador del formulario de registro: texto tal cual lo escribe el operador
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct VehicleDraft {
    #[validate(length(max = 20))]
    pub plate: String,

    #[validate(length(max = 100))]
    pub model: String,

    #[validate(length(max = 120))]
    pub owner_name: String,

    #[validate(length(max = 40))]
    pub contact: String,

    pub service_type: String,

    pub parking_fee: String,

    pub entry_timestamp: String,
}

// Response de vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub plate: String,
    pub model: String,
    pub owner_name: String,
    pub contact: String,
    pub service_type: ServiceType,
    pub parking_fee: Option<Decimal>,
    pub entry_timestamp: NaiveDateTime,
    pub exit_timestamp: Option<NaiveDateTime>,
    pub in_service: bool,
}

impl From<&Vehicle> for VehicleResponse {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            plate: vehicle.plate.clone(),
            model: vehicle.model.clone(),
            owner_name: vehicle.owner_name.clone(),
            contact: vehicle.contact.clone(),
            service_type: vehicle.service_type,
            parking_fee: vehicle.parking_fee,
            entry_timestamp: vehicle.entry_timestamp,
            exit_timestamp: vehicle.exit_timestamp,
            in_service: vehicle.is_in_service(),
        }
    }
}

// Query string del historial: ?search=&service=&date=
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub search: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
}

impl TryFrom<HistoryQuery> for HistoryFilter {
    type Error = AppError;

    fn try_from(query: HistoryQuery) -> Result<Self, Self::Error> {
        let service_type = match query.service.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) => Some(
                validate_service_type(label)
                    .map_err(|_| bad_request_error(&format!("Unknown service type '{}'", label)))?,
            ),
        };

        let date: Option<NaiveDate> = match query.date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(day) => Some(
                validate_date(day)
                    .map_err(|_| bad_request_error(&format!("Invalid date '{}', expected YYYY-MM-DD", day)))?,
            ),
        };

        Ok(HistoryFilter {
            search_text: query.search.unwrap_or_default(),
            service_type,
            date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub tab: crate::controllers::view_composer::ActiveTab,
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
