//! DTOs de vehículos

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Vehicle, VehicleStatus, VehicleType};
use crate::services::availability_service::BookedRange;

/// Request para crear un nuevo vehículo (staff)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    /// car | motorbike | truck
    #[serde(rename = "type")]
    pub vehicle_type: String,

    /// Tarifa listada por día
    pub rate: Decimal,

    pub image_path: Option<String>,
}

/// Filtros del catálogo. min/max llegan como texto y se ignoran si no
/// parsean como número, igual que hacía el formulario original.
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub brand: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Response de vehículo para la API
#[derive(Debug, Clone, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub rate: Decimal,
    pub status: VehicleStatus,
    pub image_path: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Vehicle> for VehicleResponse {
    fn from(v: &Vehicle) -> Self {
        Self {
            id: v.id,
            brand: v.brand.clone(),
            model: v.model.clone(),
            vehicle_type: v.vehicle_type,
            rate: v.rate,
            status: v.status,
            image_path: v.image_path.clone(),
            created_at: v.created_at,
        }
    }
}

/// Detalle de vehículo con su calendario de reservas activas
#[derive(Debug, Serialize)]
pub struct VehicleDetailResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub calendar: Vec<BookedRange>,
}
