use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::rental_controller::RentalController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::rental_dto::{
    CloseRentalResponse, CreateRentalRequest, RentalHistoryEntry, RentalResponse,
};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_rental))
        .route("/mine", get(my_rentals))
        .route("/:id", get(invoice))
        .route("/:id/return", post(return_rental))
        .route("/:id/cancel", post(cancel_rental))
}

async fn create_rental(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateRentalRequest>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.store.clone());
    let rental = controller.rent(
        auth.user_id,
        request.vehicle_id,
        &request.start_date,
        &request.end_date,
    )?;
    Ok(Json(ApiResponse::success_with_message(
        RentalResponse::from(&rental),
        "Rental created".to_string(),
    )))
}

async fn my_rentals(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<ApiResponse<Vec<RentalHistoryEntry>>> {
    let controller = RentalController::new(state.store.clone());
    Json(ApiResponse::success(controller.rentals_for_user(auth.user_id)))
}

async fn invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.store.clone());
    let rental = controller.invoice(id, auth.user_id, auth.is_staff())?;
    Ok(Json(ApiResponse::success(RentalResponse::from(&rental))))
}

async fn return_rental(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CloseRentalResponse>>, AppError> {
    let controller = RentalController::new(state.store.clone());
    let outcome = controller.return_vehicle(id, auth.user_id, auth.is_staff())?;
    Ok(Json(ApiResponse::success(CloseRentalResponse {
        message: outcome.message.to_string(),
        rental: RentalResponse::from(&outcome.rental),
    })))
}

async fn cancel_rental(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CloseRentalResponse>>, AppError> {
    let controller = RentalController::new(state.store.clone());
    let outcome = controller.cancel_rental(id, auth.user_id, auth.is_staff())?;
    Ok(Json(ApiResponse::success(CloseRentalResponse {
        message: outcome.message.to_string(),
        rental: RentalResponse::from(&outcome.rental),
    })))
}
