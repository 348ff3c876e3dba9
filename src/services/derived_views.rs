//! Vistas derivadas
//!
//! Funciones puras sobre una foto de la colección. No hay cache: se
//! recalculan en cada lectura y conservan el orden del store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::vehicle::Vehicle;

/// Vehículos sin hora de salida
pub fn in_service(vehicles: &[Vehicle]) -> Vec<&Vehicle> {
    vehicles.iter().filter(|v| v.is_in_service()).collect()
}

/// Vehículos con hora de salida
pub fn completed(vehicles: &[Vehicle]) -> Vec<&Vehicle> {
    vehicles.iter().filter(|v| v.is_completed()).collect()
}

/// Finalizados cuya salida cae en `day` (igualdad de fecha de calendario,
/// no una ventana de 24h)
pub fn completed_on(vehicles: &[Vehicle], day: NaiveDate) -> Vec<&Vehicle> {
    vehicles
        .iter()
        .filter(|v| v.exit_date() == Some(day))
        .collect()
}

/// Suma de tarifas; la tarifa ausente cuenta como cero.
///
/// Satura en `Decimal::MAX` en lugar de desbordar.
pub fn revenue<'a, I>(vehicles: I) -> Decimal
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    vehicles
        .into_iter()
        .fold(Decimal::ZERO, |sum, v| sum.saturating_add(v.fee_or_zero()))
}

/// Resumen del día para el dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: NaiveDate,
    pub in_service_count: usize,
    pub completed_count: usize,
    pub revenue: Decimal,
}

pub fn day_summary(vehicles: &[Vehicle], day: NaiveDate) -> DaySummary {
    let finished = completed_on(vehicles, day);
    DaySummary {
        day,
        in_service_count: in_service(vehicles).len(),
        completed_count: finished.len(),
        revenue: revenue(finished),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::ServiceType;
    use chrono::NaiveDateTime;
    use uuid::Uuid;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn vehicle(plate: &str, fee: Option<Decimal>, entry: &str, exit: Option<&str>) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: plate.to_string(),
            model: String::new(),
            owner_name: "Cliente".to_string(),
            contact: String::new(),
            service_type: ServiceType::LavagemSimples,
            parking_fee: fee,
            entry_timestamp: at(entry),
            exit_timestamp: exit.map(at),
        }
    }

    fn fixture() -> Vec<Vehicle> {
        vec![
            vehicle("TODAY-1", Some(Decimal::new(1500, 2)), "2024-01-16T08:00", Some("2024-01-16T09:00")),
            vehicle("YESTERDAY", Some(Decimal::new(9900, 2)), "2024-01-15T08:00", Some("2024-01-15T23:59")),
            vehicle("OPEN", Some(Decimal::new(5000, 2)), "2024-01-16T07:00", None),
            vehicle("TODAY-2", None, "2024-01-15T22:00", Some("2024-01-16T00:00")),
            vehicle("TODAY-3", Some(Decimal::new(550, 2)), "2024-01-16T10:00", Some("2024-01-16T11:00")),
        ]
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let vehicles = fixture();
        let open = in_service(&vehicles);
        let done = completed(&vehicles);

        assert_eq!(open.len() + done.len(), vehicles.len());
        assert!(open.iter().all(|v| !done.iter().any(|d| d.id == v.id)));
    }

    #[test]
    fn test_only_today_exits_count_towards_revenue() {
        let vehicles = fixture();
        let today = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();

        let plates: Vec<_> = completed_on(&vehicles, today).iter().map(|v| v.plate.as_str()).collect();
        assert_eq!(plates, vec!["TODAY-1", "TODAY-2", "TODAY-3"]);
        assert_eq!(revenue(completed_on(&vehicles, today)), Decimal::new(2050, 2));
    }

    #[test]
    fn test_day_summary() {
        let vehicles = fixture();
        let summary = day_summary(&vehicles, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        assert_eq!(summary.in_service_count, 1);
        assert_eq!(summary.completed_count, 1);
        assert_eq!(summary.revenue, Decimal::new(9900, 2));
    }

    #[test]
    fn test_revenue_saturates_instead_of_overflowing() {
        let vehicles = vec![
            vehicle("BIG-1", Some(Decimal::MAX), "2024-01-16T08:00", Some("2024-01-16T09:00")),
            vehicle("BIG-2", Some(Decimal::MAX), "2024-01-16T08:00", Some("2024-01-16T10:00")),
        ];
        let summary = day_summary(&vehicles, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        assert_eq!(summary.completed_count, 2);
        assert_eq!(summary.revenue, Decimal::MAX);
    }

    #[test]
    fn test_empty_collection() {
        let summary = day_summary(&[], NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(summary.revenue, Decimal::ZERO);
        assert_eq!(summary.in_service_count, 0);
    }
}
