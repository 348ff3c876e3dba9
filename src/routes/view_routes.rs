use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::notifications::Notification;
use crate::controllers::view_composer::{Command, DashboardView, HistoryView, ViewModel};
use crate::dto::vehicle_dto::{ApiResponse, HistoryQuery, NavigateRequest};
use crate::services::history_filter::HistoryFilter;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_view_router() -> Router<AppState> {
    Router::new()
        .route("/view", get(current_view))
        .route("/navigate", post(navigate))
        .route("/dashboard", get(dashboard))
        .route("/history", get(history))
        .route("/history/filter", post(filter_history))
        .route("/refresh", post(refresh))
        .route("/notifications", get(drain_notifications))
}

async fn current_view(State(state): State<AppState>) -> Json<ApiResponse<ViewModel>> {
    let composer = state.composer.lock().await;
    Json(ApiResponse::success(composer.render()))
}

async fn navigate(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<ApiResponse<ViewModel>>, AppError> {
    let mut composer = state.composer.lock().await;
    let view = composer.handle(Command::Navigate(request.tab)).await?;
    Ok(Json(ApiResponse::success(view)))
}

async fn dashboard(State(state): State<AppState>) -> Json<ApiResponse<DashboardView>> {
    let composer = state.composer.lock().await;
    Json(ApiResponse::success(composer.dashboard()))
}

/// Consulta de solo lectura; el filtro activo no cambia
async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<HistoryView>>, AppError> {
    let filter = HistoryFilter::try_from(query)?;
    let composer = state.composer.lock().await;
    Ok(Json(ApiResponse::success(composer.history_with(&filter))))
}

/// Reemplaza el filtro activo del historial
async fn filter_history(
    State(state): State<AppState>,
    Json(query): Json<HistoryQuery>,
) -> Result<Json<ApiResponse<HistoryView>>, AppError> {
    let filter = HistoryFilter::try_from(query)?;
    let mut composer = state.composer.lock().await;
    composer.handle(Command::FilterHistory(filter)).await?;
    Ok(Json(ApiResponse::success(composer.history())))
}

async fn refresh(State(state): State<AppState>) -> Result<Json<ApiResponse<ViewModel>>, AppError> {
    let mut composer = state.composer.lock().await;
    let view = composer.handle(Command::Refresh).await?;
    Ok(Json(ApiResponse::success(view)))
}

async fn drain_notifications(State(state): State<AppState>) -> Json<ApiResponse<Vec<Notification>>> {
    let mut composer = state.composer.lock().await;
    Json(ApiResponse::success(composer.drain_notifications()))
}
