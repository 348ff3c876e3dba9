//! Compositor de vistas
//!
//! Dueño del store, del formulario, del filtro del historial y de la pestaña
//! activa. Cada acción del usuario llega como un `Command`; el compositor la
//! aplica y devuelve la vista de la pestaña activa ya recalculada.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::controllers::notifications::{Notification, NotificationCenter};
use crate::controllers::registration_form::RegistrationForm;
use crate::dto::vehicle_dto::{VehicleDraft, VehicleResponse};
use crate::models::vehicle::{ServiceType, Vehicle};
use crate::services::clock::Clock;
use crate::services::derived_views::{completed, day_summary, in_service};
use crate::services::history_filter::HistoryFilter;
use crate::services::vehicle_store::VehicleStore;
use crate::utils::errors::AppResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Dashboard,
    Register,
    History,
}

/// Acciones que las vistas pueden pedir
#[derive(Debug, Clone)]
pub enum Command {
    Navigate(ActiveTab),
    EditDraft(VehicleDraft),
    SubmitRegistration,
    FinishVehicle(Uuid),
    FilterHistory(HistoryFilter),
    Refresh,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub in_service: Vec<VehicleResponse>,
    pub in_service_count: usize,
    pub completed_today: usize,
    pub today_revenue: Decimal,
    pub today: NaiveDate,
    /// Con el taller vacío, el dashboard ofrece ir al registro
    pub empty_state_action: Option<ActiveTab>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterView {
    pub draft: VehicleDraft,
    pub service_options: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub filter: HistoryFilter,
    pub service_options: Vec<&'static str>,
    pub total_completed: usize,
    pub vehicles: Vec<VehicleResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tab", content = "view", rename_all = "lowercase")]
pub enum ViewModel {
    Dashboard(DashboardView),
    Register(RegisterView),
    History(HistoryView),
}

pub struct ViewComposer {
    store: VehicleStore,
    form: RegistrationForm,
    history_filter: HistoryFilter,
    active_tab: ActiveTab,
    notifications: NotificationCenter,
}

impl ViewComposer {
    pub fn new(store: VehicleStore) -> Self {
        let form = RegistrationForm::new(store.clock().now());
        Self {
            store,
            form,
            history_filter: HistoryFilter::default(),
            active_tab: ActiveTab::default(),
            notifications: NotificationCenter::new(),
        }
    }

    pub fn store(&self) -> &VehicleStore {
        &self.store
    }

    /// Aplicar un comando y devolver la vista activa recalculada
    pub async fn handle(&mut self, command: Command) -> AppResult<ViewModel> {
        debug!("📨 Comando recibido: {:?}", command);
        match command {
            Command::Navigate(tab) => self.active_tab = tab,
            Command::EditDraft(draft) => self.form.edit(draft),
            Command::SubmitRegistration => {
                self.submit_registration().await?;
            }
            Command::FinishVehicle(id) => {
                self.finish_vehicle(id).await?;
            }
            Command::FilterHistory(filter) => self.history_filter = filter,
            Command::Refresh => self.refresh().await?,
        }
        Ok(self.render())
    }

    pub async fn submit_registration(&mut self) -> AppResult<Vehicle> {
        let vehicle = self
            .form
            .submit(&mut self.store, &mut self.notifications)
            .await?;
        self.active_tab = ActiveTab::Dashboard;
        Ok(vehicle)
    }

    pub async fn finish_vehicle(&mut self, id: Uuid) -> AppResult<Vehicle> {
        match self.store.finish(id).await {
            Ok(vehicle) => {
                self.notifications.push(Notification::success(
                    "Serviço finalizado!",
                    "O veículo foi movido para o histórico.",
                ));
                Ok(vehicle)
            }
            Err(e) => {
                warn!("⚠️ No se pudo finalizar {}: {}", id, e);
                self.notifications.push(Notification::destructive(
                    "Erro ao finalizar serviço",
                    "Não foi possível atualizar o veículo no banco.",
                ));
                Err(e)
            }
        }
    }

    pub async fn refresh(&mut self) -> AppResult<()> {
        if let Err(e) = self.store.refresh().await {
            self.notifications.push(Notification::destructive(
                "Erro ao carregar veículos",
                "Não foi possível carregar os dados do banco.",
            ));
            return Err(e);
        }
        Ok(())
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    pub fn render(&self) -> ViewModel {
        match self.active_tab {
            ActiveTab::Dashboard => ViewModel::Dashboard(self.dashboard()),
            ActiveTab::Register => ViewModel::Register(self.register_view()),
            ActiveTab::History => ViewModel::History(self.history()),
        }
    }

    pub fn dashboard(&self) -> DashboardView {
        let vehicles = self.store.list();
        let summary = day_summary(vehicles, self.store.clock().today());
        let open: Vec<VehicleResponse> = in_service(vehicles).into_iter().map(VehicleResponse::from).collect();

        DashboardView {
            empty_state_action: open.is_empty().then_some(ActiveTab::Register),
            in_service_count: summary.in_service_count,
            in_service: open,
            completed_today: summary.completed_count,
            today_revenue: summary.revenue,
            today: summary.day,
        }
    }

    pub fn register_view(&self) -> RegisterView {
        RegisterView {
            draft: self.form.draft().clone(),
            service_options: ServiceType::options(),
        }
    }

    /// Historial con el filtro activo
    pub fn history(&self) -> HistoryView {
        self.history_with(&self.history_filter)
    }

    /// Historial con un filtro puntual, sin tocar el filtro activo
    pub fn history_with(&self, filter: &HistoryFilter) -> HistoryView {
        let done = completed(self.store.list());
        let total_completed = done.len();
        let vehicles = filter
            .apply(done)
            .into_iter()
            .map(VehicleResponse::from)
            .collect();

        HistoryView {
            filter: filter.clone(),
            service_options: ServiceType::options(),
            total_completed,
            vehicles,
        }
    }
}
