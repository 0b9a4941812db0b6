//! Catálogo y administración de vehículos

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::database::Store;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, VehicleDetailResponse, VehicleFilters, VehicleResponse,
};
use crate::models::{Vehicle, VehicleType, PLACEHOLDER_IMAGE};
use crate::services::availability_service::{self, BookedRange};
use crate::utils::errors::AppError;
use crate::utils::validation::valid_image_path;

/// min/max inválidos se ignoran en lugar de fallar el request
fn to_decimal_safe(value: &Option<String>) -> Option<Decimal> {
    value.as_deref().and_then(|s| s.trim().parse().ok())
}

pub struct VehicleController {
    store: Arc<Store>,
}

impl VehicleController {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Catálogo con filtros: tipo, marca (match exacto), rango de tarifa
    pub fn list(&self, filters: &VehicleFilters) -> Vec<VehicleResponse> {
        // un tipo desconocido no matchea nada
        let vehicle_type = match filters.vehicle_type.as_deref() {
            Some(raw) => match VehicleType::parse(raw) {
                Some(t) => Some(t),
                None => return Vec::new(),
            },
            None => None,
        };
        let min_rate = to_decimal_safe(&filters.min);
        let max_rate = to_decimal_safe(&filters.max);

        self.store.read(|data| {
            let mut vehicles: Vec<VehicleResponse> = data
                .vehicles
                .values()
                .filter(|v| vehicle_type.map_or(true, |t| v.vehicle_type == t))
                .filter(|v| filters.brand.as_deref().map_or(true, |b| v.brand == b))
                .filter(|v| min_rate.map_or(true, |min| v.rate >= min))
                .filter(|v| max_rate.map_or(true, |max| v.rate <= max))
                .map(VehicleResponse::from)
                .collect();
            vehicles.sort_by(|a, b| a.brand.cmp(&b.brand).then(a.model.cmp(&b.model)));
            vehicles
        })
    }

    /// Detalle con el calendario de reservas activas
    pub fn get(&self, vehicle_id: Uuid) -> Result<VehicleDetailResponse, AppError> {
        self.store.read(|data| {
            let vehicle = data
                .vehicles
                .get(&vehicle_id)
                .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
            Ok(VehicleDetailResponse {
                vehicle: VehicleResponse::from(vehicle),
                calendar: availability_service::availability_calendar(data, vehicle_id),
            })
        })
    }

    pub fn calendar(&self, vehicle_id: Uuid) -> Result<Vec<BookedRange>, AppError> {
        self.store.read(|data| {
            if !data.vehicles.contains_key(&vehicle_id) {
                return Err(AppError::NotFound("Vehicle not found".to_string()));
            }
            Ok(availability_service::availability_calendar(data, vehicle_id))
        })
    }

    /// Alta de vehículo desde el panel de staff.
    /// Imagen inválida o ausente cae al placeholder.
    pub fn create(&self, request: CreateVehicleRequest) -> Result<VehicleResponse, AppError> {
        request.validate()?;

        let vehicle_type = VehicleType::parse(&request.vehicle_type)
            .ok_or_else(|| AppError::ValidationError("Invalid vehicle type".to_string()))?;
        if request.rate <= Decimal::ZERO {
            return Err(AppError::ValidationError(
                "Rate must be a positive amount".to_string(),
            ));
        }
        let image_path = match request.image_path.as_deref() {
            Some(img) if valid_image_path(img) => img.trim().to_string(),
            _ => PLACEHOLDER_IMAGE.to_string(),
        };

        let vehicle = Vehicle::new(
            request.brand.trim().to_string(),
            request.model.trim().to_string(),
            vehicle_type,
            request.rate,
            image_path,
        );

        self.store.mutate(|data| {
            info!("vehículo {} creado: {} {}", vehicle.id, vehicle.brand, vehicle.model);
            let response = VehicleResponse::from(&vehicle);
            data.vehicles.insert(vehicle.id, vehicle.clone());
            Ok(response)
        })
    }

    /// Baja solo si el vehículo no tiene rentals activos.
    /// La fuente de verdad son los rentals, no el status snapshot.
    pub fn delete(&self, vehicle_id: Uuid) -> Result<(), AppError> {
        self.store.mutate(|data| {
            if !data.vehicles.contains_key(&vehicle_id) {
                return Err(AppError::NotFound("Vehicle not found".to_string()));
            }
            if data.has_active_rental(vehicle_id) {
                return Err(AppError::Conflict(
                    "Vehicle is currently rented/overdue".to_string(),
                ));
            }
            data.vehicles.remove(&vehicle_id);
            info!("vehículo {} eliminado", vehicle_id);
            Ok(())
        })
    }
}
