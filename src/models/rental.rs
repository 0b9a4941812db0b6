//! Modelo de Rental
//!
//! Un rental es inmutable en su identidad y en el par renter/vehicle; solo el
//! estado y los campos post-cierre (`used_days`, `overdue_days`, `total`)
//! mutan después de crearlo. La tarifa y el descuento quedan congelados al
//! momento del booking.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado del ciclo de vida - las transiciones son unidireccionales
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Rented,
    Overdue,
    Returned,
    Cancelled,
}

impl RentalStatus {
    /// Un rental activo cuenta contra la disponibilidad del vehículo
    pub fn is_active(&self) -> bool {
        matches!(self, RentalStatus::Rented | RentalStatus::Overdue)
    }

    /// Un rental terminal queda excluido del chequeo de disponibilidad
    pub fn is_terminal(&self) -> bool {
        matches!(self, RentalStatus::Returned | RentalStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Rented => "rented",
            RentalStatus::Overdue => "overdue",
            RentalStatus::Returned => "returned",
            RentalStatus::Cancelled => "cancelled",
        }
    }
}

/// Rental principal - se persiste en el snapshot del store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rental {
    pub id: Uuid,
    pub renter_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    /// Fecha de fin exclusiva: [start_date, end_date)
    pub end_date: NaiveDate,
    pub days: i64,
    /// Tarifa efectiva por día congelada al crear (multiplicador incluido)
    pub rate: Decimal,
    /// Ratio de descuento congelado al crear, p.ej. 0.15
    pub discount: Decimal,
    pub total: Decimal,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub returned_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cancelled_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub used_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub overdue_days: Option<i64>,
}
