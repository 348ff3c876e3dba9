//! Formulario de registro de entrada
//!
//! Mantiene el borrador entre acciones. Un envío rechazado no toca el store
//! ni limpia lo que el operador escribió; un envío aceptado reinicia el
//! borrador con la hora de entrada en "ahora".

use chrono::NaiveDateTime;
use tracing::warn;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::controllers::notifications::{Notification, NotificationCenter};
use crate::dto::vehicle_dto::VehicleDraft;
use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::services::clock::Clock;
use crate::services::vehicle_store::VehicleStore;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{
    validate_datetime_local, validate_fee, validate_not_empty, validate_service_type,
    DATETIME_LOCAL_FORMAT,
};

pub struct RegistrationForm {
    draft: VehicleDraft,
}

impl RegistrationForm {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            draft: Self::blank_draft(now),
        }
    }

    fn blank_draft(now: NaiveDateTime) -> VehicleDraft {
        VehicleDraft {
            entry_timestamp: now.format(DATETIME_LOCAL_FORMAT).to_string(),
            ..Default::default()
        }
    }

    pub fn draft(&self) -> &VehicleDraft {
        &self.draft
    }

    /// Reemplazar el borrador; la placa se escribe siempre en mayúsculas
    pub fn edit(&mut self, draft: VehicleDraft) {
        self.draft = VehicleDraft {
            plate: draft.plate.to_uppercase(),
            ..draft
        };
    }

    pub fn reset(&mut self, now: NaiveDateTime) {
        self.draft = Self::blank_draft(now);
    }

    /// Validar el borrador y convertirlo en la entrada del store
    pub fn check(&self) -> Result<NewVehicle, ValidationErrors> {
        let draft = &self.draft;
        let mut errors = match draft.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Err(e) = validate_not_empty(&draft.plate) {
            errors.add("plate", e);
        }
        if let Err(e) = validate_not_empty(&draft.owner_name) {
            errors.add("owner_name", e);
        }

        let service_type = match validate_not_empty(&draft.service_type) {
            Err(e) => {
                errors.add("service_type", e);
                None
            }
            Ok(()) => match validate_service_type(draft.service_type.trim()) {
                Ok(service) => Some(service),
                Err(e) => {
                    errors.add("service_type", e);
                    None
                }
            },
        };

        if !draft.parking_fee.trim().is_empty() {
            if let Err(e) = validate_fee(&draft.parking_fee) {
                errors.add("parking_fee", e);
            }
        }

        let entry_timestamp = if draft.entry_timestamp.trim().is_empty() {
            None
        } else {
            match validate_datetime_local(&draft.entry_timestamp) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    errors.add("entry_timestamp", e);
                    None
                }
            }
        };

        match service_type {
            Some(service_type) if errors.errors().is_empty() => Ok(NewVehicle {
                plate: draft.plate.clone(),
                model: draft.model.clone(),
                owner_name: draft.owner_name.clone(),
                contact: draft.contact.clone(),
                service_type,
                parking_fee: draft.parking_fee.clone(),
                entry_timestamp,
            }),
            _ => Err(errors),
        }
    }

    /// Enviar el borrador al store
    pub async fn submit(
        &mut self,
        store: &mut VehicleStore,
        notifications: &mut NotificationCenter,
    ) -> AppResult<Vehicle> {
        let input = match self.check() {
            Ok(input) => input,
            Err(errors) => {
                warn!("⚠️ Registro rechazado: {}", errors);
                notifications.push(rejection_notice(&errors));
                return Err(AppError::Validation(errors));
            }
        };

        match store.add(input).await {
            Ok(vehicle) => {
                self.reset(store.clock().now());
                notifications.push(Notification::success(
                    "Veículo registrado!",
                    "O veículo foi adicionado à lista de serviços.",
                ));
                Ok(vehicle)
            }
            Err(e) => {
                notifications.push(Notification::destructive(
                    "Erro ao registrar veículo",
                    "Não foi possível salvar o veículo no banco.",
                ));
                Err(e)
            }
        }
    }
}

fn is_required_error(error: &ValidationError) -> bool {
    error.code == "required"
}

fn rejection_notice(errors: &ValidationErrors) -> Notification {
    let missing_required = errors
        .field_errors()
        .values()
        .any(|field| field.iter().any(is_required_error));

    if missing_required {
        Notification::destructive("Campos obrigatórios", "Preencha placa, proprietário e serviço.")
    } else {
        Notification::destructive("Dados inválidos", "Verifique a taxa e a data de entrada.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::notifications::NotificationVariant;
    use crate::repositories::vehicle_repository::InMemoryVehicleRepository;
    use crate::services::clock::FixedClock;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn setup() -> (RegistrationForm, VehicleStore, NotificationCenter) {
        let clock = Arc::new(FixedClock::new(at("2024-01-15T09:30")));
        let store = VehicleStore::new(Arc::new(InMemoryVehicleRepository::new()), clock.clone());
        (RegistrationForm::new(clock.now()), store, NotificationCenter::new())
    }

    fn complete_draft() -> VehicleDraft {
        VehicleDraft {
            plate: "abc-1234".to_string(),
            model: "Honda Civic".to_string(),
            owner_name: "João Silva".to_string(),
            contact: "(11) 99999-9999".to_string(),
            service_type: "Lavagem Completa".to_string(),
            parking_fee: "15.50".to_string(),
            entry_timestamp: "2024-01-15T09:30".to_string(),
        }
    }

    #[test]
    fn test_new_form_defaults_entry_to_now() {
        let (form, _store, _notifications) = setup();
        assert_eq!(form.draft().entry_timestamp, "2024-01-15T09:30");
        assert!(form.draft().plate.is_empty());
    }

    #[test]
    fn test_edit_uppercases_plate() {
        let (mut form, _store, _notifications) = setup();
        form.edit(complete_draft());
        assert_eq!(form.draft().plate, "ABC-1234");
    }

    #[tokio::test]
    async fn test_missing_owner_is_rejected_without_mutation() {
        let (mut form, mut store, mut notifications) = setup();
        let draft = VehicleDraft {
            owner_name: String::new(),
            ..complete_draft()
        };
        form.edit(draft.clone());

        let result = form.submit(&mut store, &mut notifications).await;

        match result {
            Err(AppError::Validation(errors)) => {
                assert!(errors.field_errors().contains_key("owner_name"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.list().is_empty());
        assert_eq!(form.draft().model, draft.model);
        assert_eq!(form.draft().parking_fee, "15.50");

        let notices = notifications.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Campos obrigatórios");
        assert_eq!(notices[0].variant, NotificationVariant::Destructive);
    }

    #[tokio::test]
    async fn test_bad_fee_is_rejected_as_invalid_data() {
        let (mut form, mut store, mut notifications) = setup();
        form.edit(VehicleDraft {
            parking_fee: "-2".to_string(),
            ..complete_draft()
        });

        assert!(form.submit(&mut store, &mut notifications).await.is_err());
        assert!(store.list().is_empty());
        assert_eq!(notifications.drain()[0].title, "Dados inválidos");
    }

    #[tokio::test]
    async fn test_fee_outside_the_column_is_rejected() {
        let (mut form, mut store, mut notifications) = setup();
        for fee in ["79228162514264337593543950335", "15.555"] {
            form.edit(VehicleDraft {
                parking_fee: fee.to_string(),
                ..complete_draft()
            });

            match form.submit(&mut store, &mut notifications).await {
                Err(AppError::Validation(errors)) => {
                    assert!(errors.field_errors().contains_key("parking_fee"));
                }
                other => panic!("expected validation error for {}, got {:?}", fee, other),
            }
            assert_eq!(notifications.drain()[0].title, "Dados inválidos");
        }
        assert!(store.list().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_service_is_rejected() {
        let (mut form, _store, _notifications) = setup();
        form.edit(VehicleDraft {
            service_type: "Lavagem Expressa".to_string(),
            ..complete_draft()
        });
        let errors = form.check().unwrap_err();
        assert!(errors.field_errors().contains_key("service_type"));
    }

    #[tokio::test]
    async fn test_successful_submit_stores_exact_fee_and_resets() {
        let (mut form, mut store, mut notifications) = setup();
        form.edit(complete_draft());

        let vehicle = form.submit(&mut store, &mut notifications).await.unwrap();

        assert_eq!(vehicle.parking_fee, Some(Decimal::new(1550, 2)));
        assert_eq!(vehicle.plate, "ABC-1234");
        assert_eq!(store.list().len(), 1);
        assert!(form.draft().plate.is_empty());
        assert!(form.draft().owner_name.is_empty());
        assert_eq!(form.draft().entry_timestamp, "2024-01-15T09:30");
        assert_eq!(notifications.drain()[0].title, "Veículo registrado!");
    }

    #[tokio::test]
    async fn test_empty_entry_defaults_to_now() {
        let (mut form, mut store, mut notifications) = setup();
        form.edit(VehicleDraft {
            entry_timestamp: String::new(),
            ..complete_draft()
        });

        let vehicle = form.submit(&mut store, &mut notifications).await.unwrap();
        assert_eq!(vehicle.entry_timestamp, at("2024-01-15T09:30"));
    }
}
