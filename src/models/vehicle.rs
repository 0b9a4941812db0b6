//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus enums de categoría y estado.
//! El campo `status` es un snapshot denormalizado que recalcula el
//! reconciliador; el booking nunca lo usa como fuente de verdad.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Imagen por defecto cuando el staff no provee una válida
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.png";

/// Categoría del vehículo - conjunto cerrado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Motorbike,
    Truck,
}

impl VehicleType {
    /// Parsear una categoría desde texto (case-insensitive)
    pub fn parse(value: &str) -> Option<VehicleType> {
        match value.trim().to_lowercase().as_str() {
            "car" => Some(VehicleType::Car),
            "motorbike" => Some(VehicleType::Motorbike),
            "truck" => Some(VehicleType::Truck),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Motorbike => "motorbike",
            VehicleType::Truck => "truck",
        }
    }
}

/// Estado snapshot del vehículo - siempre re-derivable desde los rentals
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Rented,
    Overdue,
}

/// Vehicle principal - se persiste en el snapshot del store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub vehicle_type: VehicleType,
    /// Tarifa listada por día, antes de multiplicador de categoría y descuento
    pub rate: Decimal,
    pub status: VehicleStatus,
    pub image_path: String,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(
        brand: String,
        model: String,
        vehicle_type: VehicleType,
        rate: Decimal,
        image_path: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            brand,
            model,
            vehicle_type,
            rate,
            status: VehicleStatus::Available,
            image_path,
            created_at: Utc::now(),
        }
    }
}
