//! Store de vehículos
//!
//! Única autoridad sobre la colección. Las vistas leen subconjuntos
//! derivados de `list()`; las mutaciones pasan por el repositorio antes de
//! tocar la colección local, así un fallo del almacén externo no deja
//! estados a medias.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::models::vehicle::{NewVehicle, Vehicle};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::clock::Clock;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{normalize_fee, normalize_plate};

pub struct VehicleStore {
    vehicles: Vec<Vehicle>,
    repository: Arc<dyn VehicleRepository>,
    clock: Arc<dyn Clock>,
    loading: bool,
}

impl VehicleStore {
    pub fn new(repository: Arc<dyn VehicleRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            vehicles: Vec::new(),
            repository,
            clock,
            loading: false,
        }
    }

    /// Todos los registros, del último añadido al primero
    pub fn list(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn get(&self, id: Uuid) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Solo es `true` mientras `refresh` espera al repositorio. Con el store
    /// detrás del mutex del compositor, un lector externo nunca lo ve activo.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Registrar la entrada de un vehículo
    pub async fn add(&mut self, input: NewVehicle) -> AppResult<Vehicle> {
        let vehicle = Vehicle {
            id: self.fresh_id(),
            plate: normalize_plate(&input.plate),
            model: input.model.trim().to_string(),
            owner_name: input.owner_name.trim().to_string(),
            contact: input.contact.trim().to_string(),
            service_type: input.service_type,
            parking_fee: normalize_fee(&input.parking_fee),
            entry_timestamp: input.entry_timestamp.unwrap_or_else(|| self.clock.now()),
            exit_timestamp: None,
        };

        if let Err(e) = self.repository.insert(&vehicle).await {
            error!("❌ Error registrando vehículo {}: {}", vehicle.plate, e);
            return Err(e);
        }

        info!(
            "🚗 Vehículo {} registrado ({}, entrada {})",
            vehicle.plate, vehicle.service_type, vehicle.entry_timestamp
        );
        self.vehicles.insert(0, vehicle.clone());
        Ok(vehicle)
    }

    /// Marcar el servicio como finalizado.
    ///
    /// La salida se fija una sola vez. Si la entrada fue editada hacia el
    /// futuro, la salida toma la hora de entrada para no quedar antes de ella.
    pub async fn finish(&mut self, id: Uuid) -> AppResult<Vehicle> {
        let index = self
            .vehicles
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        let entry = self.vehicles[index].entry_timestamp;
        if let Some(exit) = self.vehicles[index].exit_timestamp {
            warn!("⚠️ Vehículo {} ya finalizado en {}", id, exit);
            return Err(AppError::Conflict(format!("Vehicle '{}' is already finished", id)));
        }

        let exit = self.clock.now().max(entry);
        if let Err(e) = self.repository.update_exit(id, exit).await {
            error!("❌ Error finalizando vehículo {}: {}", id, e);
            return Err(e);
        }

        let vehicle = &mut self.vehicles[index];
        vehicle.exit_timestamp = Some(exit);
        info!("✅ Servicio finalizado para {} a las {}", vehicle.plate, exit);
        Ok(vehicle.clone())
    }

    /// Recargar desde el repositorio. Si falla, la colección queda intacta.
    pub async fn refresh(&mut self) -> AppResult<()> {
        self.loading = true;
        let result = self.repository.fetch_all().await;
        self.loading = false;

        match result {
            Ok(vehicles) => {
                info!("🔄 {} vehículos cargados", vehicles.len());
                self.vehicles = vehicles;
                Ok(())
            }
            Err(e) => {
                error!("❌ Error cargando vehículos: {}", e);
                Err(e)
            }
        }
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}
