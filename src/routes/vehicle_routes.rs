use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::controllers::view_composer::{Command, ViewModel};
use crate::dto::vehicle_dto::{ApiResponse, VehicleDraft, VehicleResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/:id/finish", post(finish_vehicle))
        .route("/register", post(register_vehicle))
        .route("/register/draft", put(edit_draft))
}

// Vehículo creado más la vista que queda activa tras el registro
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub vehicle: VehicleResponse,
    pub view: ViewModel,
}

async fn list_vehicles(State(state): State<AppState>) -> Json<ApiResponse<Vec<VehicleResponse>>> {
    let composer = state.composer.lock().await;
    let vehicles: Vec<VehicleResponse> = composer
        .store()
        .list()
        .iter()
        .map(VehicleResponse::from)
        .collect();
    Json(ApiResponse::success(vehicles))
}

async fn edit_draft(
    State(state): State<AppState>,
    Json(draft): Json<VehicleDraft>,
) -> Result<Json<ApiResponse<ViewModel>>, AppError> {
    let mut composer = state.composer.lock().await;
    let view = composer.handle(Command::EditDraft(draft)).await?;
    Ok(Json(ApiResponse::success(view)))
}

async fn register_vehicle(
    State(state): State<AppState>,
    Json(draft): Json<VehicleDraft>,
) -> Result<Json<ApiResponse<RegistrationResponse>>, AppError> {
    let mut composer = state.composer.lock().await;
    composer.handle(Command::EditDraft(draft)).await?;
    let vehicle = composer.submit_registration().await?;

    let response = RegistrationResponse {
        vehicle: VehicleResponse::from(&vehicle),
        view: composer.render(),
    };
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Veículo registrado!".to_string(),
    )))
}

async fn finish_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ViewModel>>, AppError> {
    let mut composer = state.composer.lock().await;
    let view = composer.handle(Command::FinishVehicle(id)).await?;
    Ok(Json(ApiResponse::success_with_message(
        view,
        "Serviço finalizado!".to_string(),
    )))
}
