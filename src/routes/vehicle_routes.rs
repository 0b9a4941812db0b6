use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{VehicleDetailResponse, VehicleFilters, VehicleResponse};
use crate::middleware::auth::AuthUser;
use crate::services::availability_service::BookedRange;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/calendar", get(vehicle_calendar))
}

async fn list_vehicles(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filters): Query<VehicleFilters>,
) -> Json<ApiResponse<Vec<VehicleResponse>>> {
    let controller = VehicleController::new(state.store.clone());
    Json(ApiResponse::success(controller.list(&filters)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(ApiResponse::success(controller.get(id)?)))
}

async fn vehicle_calendar(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<BookedRange>>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    Ok(Json(ApiResponse::success(controller.calendar(id)?)))
}
