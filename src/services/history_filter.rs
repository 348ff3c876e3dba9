//! Filtro del historial de servicios finalizados

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::vehicle::{ServiceType, Vehicle};

/// Búsqueda libre más dos filtros exactos (servicio y fecha de entrada)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryFilter {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub service_type: Option<ServiceType>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl HistoryFilter {
    pub fn is_empty(&self) -> bool {
        self.search_text.trim().is_empty() && self.service_type.is_none() && self.date.is_none()
    }

    /// Placa, propietario o modelo contienen el texto, sin distinguir mayúsculas
    fn matches_search(&self, vehicle: &Vehicle) -> bool {
        let needle = self.search_text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&vehicle.plate, &vehicle.owner_name, &vehicle.model]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_service(&self, vehicle: &Vehicle) -> bool {
        self.service_type
            .map_or(true, |service| vehicle.service_type == service)
    }

    /// Compara con la fecha de entrada, no la de salida
    fn matches_date(&self, vehicle: &Vehicle) -> bool {
        self.date.map_or(true, |day| vehicle.entry_date() == day)
    }

    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.matches_search(vehicle) && self.matches_service(vehicle) && self.matches_date(vehicle)
    }

    pub fn apply<'a, I>(&self, vehicles: I) -> Vec<&'a Vehicle>
    where
        I: IntoIterator<Item = &'a Vehicle>,
    {
        vehicles.into_iter().filter(|v| self.matches(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use uuid::Uuid;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn completed(plate: &str, owner: &str, model: &str, service: ServiceType, entry: &str) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: plate.to_string(),
            model: model.to_string(),
            owner_name: owner.to_string(),
            contact: String::new(),
            service_type: service,
            parking_fee: None,
            entry_timestamp: at(entry),
            exit_timestamp: Some(at("2024-01-20T18:00")),
        }
    }

    fn fixture() -> Vec<Vehicle> {
        vec![
            completed("ABC-1234", "João", "Honda Civic", ServiceType::Polimento, "2024-01-15T09:30"),
            completed("XYZ-9999", "Maria", "Toyota Corolla", ServiceType::LavagemCompleta, "2024-01-16T10:15"),
        ]
    }

    fn plates(found: Vec<&Vehicle>) -> Vec<&str> {
        found.into_iter().map(|v| v.plate.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let vehicles = fixture();
        let filter = HistoryFilter {
            search_text: "abc".to_string(),
            ..Default::default()
        };
        assert_eq!(plates(filter.apply(&vehicles)), vec!["ABC-1234"]);
    }

    #[test]
    fn test_search_matches_owner_and_model() {
        let vehicles = fixture();
        let by_owner = HistoryFilter {
            search_text: "MARIA".to_string(),
            ..Default::default()
        };
        let by_model = HistoryFilter {
            search_text: "civic".to_string(),
            ..Default::default()
        };
        assert_eq!(plates(by_owner.apply(&vehicles)), vec!["XYZ-9999"]);
        assert_eq!(plates(by_model.apply(&vehicles)), vec!["ABC-1234"]);
    }

    #[test]
    fn test_service_facet() {
        let vehicles = fixture();
        let filter = HistoryFilter {
            service_type: Some(ServiceType::Polimento),
            ..Default::default()
        };
        assert_eq!(plates(filter.apply(&vehicles)), vec!["ABC-1234"]);
    }

    #[test]
    fn test_date_facet_uses_entry_date() {
        let vehicles = fixture();
        let filter = HistoryFilter {
            date: NaiveDate::from_ymd_opt(2024, 1, 16),
            ..Default::default()
        };
        assert_eq!(plates(filter.apply(&vehicles)), vec!["XYZ-9999"]);

        // Ambos salieron el 20, pero ninguno entró ese día
        let exit_day = HistoryFilter {
            date: NaiveDate::from_ymd_opt(2024, 1, 20),
            ..Default::default()
        };
        assert!(exit_day.apply(&vehicles).is_empty());
    }

    #[test]
    fn test_predicates_are_combined_with_and() {
        let vehicles = fixture();
        let filter = HistoryFilter {
            search_text: "a".to_string(),
            service_type: Some(ServiceType::LavagemCompleta),
            date: None,
        };
        assert_eq!(plates(filter.apply(&vehicles)), vec!["XYZ-9999"]);
    }

    #[test]
    fn test_blank_search_is_ignored_and_padding_trimmed() {
        let vehicles = fixture();
        let blank = HistoryFilter {
            search_text: "   ".to_string(),
            ..Default::default()
        };
        assert!(blank.is_empty());
        assert_eq!(plates(blank.apply(&vehicles)), vec!["ABC-1234", "XYZ-9999"]);

        let padded = HistoryFilter {
            search_text: " abc ".to_string(),
            ..Default::default()
        };
        assert_eq!(plates(padded.apply(&vehicles)), vec!["ABC-1234"]);
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let vehicles = fixture();
        let filter = HistoryFilter::default();
        assert!(filter.is_empty());
        assert_eq!(plates(filter.apply(&vehicles)), vec!["ABC-1234", "XYZ-9999"]);
    }
}
