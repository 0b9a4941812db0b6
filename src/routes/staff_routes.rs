use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::user_controller::UserController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::user_dto::{CreateUserRequest, UserResponse};
use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleResponse};
use crate::middleware::auth::AuthUser;
use crate::services::analytics_service::{AnalyticsReport, AnalyticsService, AnalyticsSummary};
use crate::services::reconciler_service::{ReconcileReport, ReconcilerService};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_staff_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", post(create_vehicle))
        .route("/vehicles/:id", delete(delete_vehicle))
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", delete(delete_user))
        .route("/analytics", get(analytics))
        .route("/analytics/summary", get(analytics_summary))
        .route("/reconcile", post(reconcile))
}

async fn create_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    auth.require_staff()?;
    let controller = VehicleController::new(state.store.clone());
    let response = controller.create(request)?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Vehicle created".to_string(),
    )))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    auth.require_staff()?;
    let controller = VehicleController::new(state.store.clone());
    controller.delete(id)?;
    Ok(Json(ApiResponse::message("Vehicle deleted".to_string())))
}

async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
    auth.require_staff()?;
    let controller = UserController::new(state.store.clone());
    Ok(Json(ApiResponse::success(controller.list())))
}

async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    auth.require_staff()?;
    let controller = UserController::new(state.store.clone());
    let response = controller.create(request)?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "User created".to_string(),
    )))
}

async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    auth.require_staff()?;
    let controller = UserController::new(state.store.clone());
    controller.delete(id)?;
    Ok(Json(ApiResponse::message("User deleted".to_string())))
}

async fn analytics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<AnalyticsReport>>, AppError> {
    auth.require_staff()?;
    let service = AnalyticsService::new(state.store.clone());
    Ok(Json(ApiResponse::success(service.report())))
}

async fn analytics_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<AnalyticsSummary>>, AppError> {
    auth.require_staff()?;
    let service = AnalyticsService::new(state.store.clone());
    Ok(Json(ApiResponse::success(service.summary())))
}

async fn reconcile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ReconcileReport>>, AppError> {
    auth.require_staff()?;
    let service = ReconcilerService::new(state.store.clone());
    Ok(Json(ApiResponse::success(service.run()?)))
}
