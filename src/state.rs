//! Shared application state
//!
//! Raíz de composición: el compositor de vistas (y con él el store) vive
//! aquí detrás de un `Mutex`, así cada acción se aplica completa antes de
//! la siguiente.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::environment::EnvironmentConfig;
use crate::controllers::view_composer::ViewComposer;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::clock::Clock;
use crate::services::vehicle_store::VehicleStore;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub composer: Arc<Mutex<ViewComposer>>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        repository: Arc<dyn VehicleRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let store = VehicleStore::new(repository, clock);
        Self {
            config,
            composer: Arc::new(Mutex::new(ViewComposer::new(store))),
        }
    }
}
