//! DTOs de rentals

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Rental, RentalStatus, VehicleType};

/// Request de booking. Las fechas viajan como texto YYYY-MM-DD y las
/// valida el motor (InvalidDate / InvalidRange / PastStartDate).
#[derive(Debug, Deserialize)]
pub struct CreateRentalRequest {
    pub vehicle_id: Uuid,
    pub start_date: String,
    pub end_date: String,
}

/// Response de rental / factura
#[derive(Debug, Clone, Serialize)]
pub struct RentalResponse {
    pub id: Uuid,
    pub renter_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
    pub rate: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue_days: Option<i64>,
}

impl From<&Rental> for RentalResponse {
    fn from(r: &Rental) -> Self {
        Self {
            id: r.id,
            renter_id: r.renter_id,
            vehicle_id: r.vehicle_id,
            start_date: r.start_date,
            end_date: r.end_date,
            days: r.days,
            rate: r.rate,
            discount: r.discount,
            total: r.total,
            status: r.status,
            created_at: r.created_at,
            returned_at: r.returned_at,
            cancelled_at: r.cancelled_at,
            used_days: r.used_days,
            overdue_days: r.overdue_days,
        }
    }
}

/// Response al cerrar un rental (return o cancel)
#[derive(Debug, Serialize)]
pub struct CloseRentalResponse {
    pub message: String,
    pub rental: RentalResponse,
}

/// Fila del historial de rentals de un usuario, con el vehículo anotado.
/// El vehículo puede haber sido borrado; los campos quedan vacíos.
#[derive(Debug, Serialize)]
pub struct RentalHistoryEntry {
    pub rental_id: Uuid,
    pub vehicle_id: Uuid,
    pub brand: String,
    pub model: String,
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
    pub rate: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub status: RentalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overdue_days: Option<i64>,
    pub created_at: DateTime<Utc>,
}
