//! Motor del ciclo de vida de rentals
//!
//! Orquesta validación, disponibilidad, pricing y transiciones de estado
//! para las operaciones rent / return / cancel. Cada escritura corre
//! completa bajo el lock exclusivo del store y persiste write-through.
//!
//! Las variantes `*_at` reciben la fecha actual como parámetro; los
//! wrappers sin sufijo leen el reloj. Así el motor queda determinístico
//! en tests sin mockear nada.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::database::Store;
use crate::dto::rental_dto::RentalHistoryEntry;
use crate::models::{Rental, RentalStatus, VehicleStatus};
use crate::services::{availability_service, pricing_service};
use crate::utils::errors::AppError;
use crate::utils::validation::{parse_date, today};

/// Resultado de cerrar un rental (return o cancel vía return)
#[derive(Debug, Clone)]
pub struct CloseOutcome {
    pub rental: Rental,
    pub message: &'static str,
}

pub struct RentalController {
    store: Arc<Store>,
}

impl RentalController {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Crear un rental si no hay solape activo para el mismo vehículo.
    pub fn rent(
        &self,
        renter_id: Uuid,
        vehicle_id: Uuid,
        start: &str,
        end: &str,
    ) -> Result<Rental, AppError> {
        self.rent_at(renter_id, vehicle_id, start, end, today())
    }

    pub fn rent_at(
        &self,
        renter_id: Uuid,
        vehicle_id: Uuid,
        start: &str,
        end: &str,
        today: NaiveDate,
    ) -> Result<Rental, AppError> {
        self.store.mutate(|data| {
            let renter = data
                .users
                .get(&renter_id)
                .ok_or_else(|| AppError::NotFound("Renter not found".to_string()))?;
            let vehicle = data
                .vehicles
                .get(&vehicle_id)
                .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

            let start_date = parse_date(start)?;
            let end_date = parse_date(end)?;
            if start_date < today {
                return Err(AppError::PastStartDate);
            }
            if end_date <= start_date {
                return Err(AppError::InvalidRange);
            }

            // Solape half-open contra rentals activos del vehículo.
            // El status snapshot del vehículo no participa acá.
            if availability_service::has_conflict(data, vehicle_id, start_date, end_date) {
                return Err(AppError::DateConflict);
            }

            let days = (end_date - start_date).num_days();
            let quote =
                pricing_service::quote(vehicle.rate, vehicle.vehicle_type, days, renter.role);

            let rental = Rental {
                id: Uuid::new_v4(),
                renter_id,
                vehicle_id,
                start_date,
                end_date,
                days,
                rate: quote.rate,
                discount: quote.discount,
                total: quote.total,
                status: RentalStatus::Rented,
                created_at: Utc::now(),
                returned_at: None,
                cancelled_at: None,
                used_days: None,
                overdue_days: None,
            };

            if let Some(vehicle) = data.vehicles.get_mut(&vehicle_id) {
                vehicle.status = VehicleStatus::Rented;
            }
            info!(
                "rental {} creado: vehículo {} del {} al {}, total {}",
                rental.id, vehicle_id, start_date, end_date, rental.total
            );
            data.rentals.insert(rental.id, rental.clone());
            Ok(rental)
        })
    }

    /// Cerrar un rental y liberar el vehículo, con chequeo de permisos
    /// para la capa HTTP (el dueño o staff).
    pub fn return_vehicle(
        &self,
        rental_id: Uuid,
        requester_id: Uuid,
        is_staff: bool,
    ) -> Result<CloseOutcome, AppError> {
        let owner = self.store.read(|data| {
            data.rentals
                .get(&rental_id)
                .map(|r| r.renter_id)
                .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))
        })?;
        if owner != requester_id && !is_staff {
            return Err(AppError::Forbidden(
                "Not allowed to return this rental".to_string(),
            ));
        }
        self.return_vehicle_at(rental_id, today())
    }

    /// Cerrar un rental:
    /// - today < start            -> cancelled, sin cargo
    /// - start <= today <= end    -> returned, se cobran los días usados (>= 1)
    /// - today > end              -> returned, overdue_days registrados,
    ///                               se factura solo hasta end
    pub fn return_vehicle_at(
        &self,
        rental_id: Uuid,
        today: NaiveDate,
    ) -> Result<CloseOutcome, AppError> {
        self.store.mutate(|data| {
            let rental = data
                .rentals
                .get_mut(&rental_id)
                .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;

            if rental.status.is_terminal() {
                return Err(AppError::AlreadyClosed);
            }

            let start = rental.start_date;
            let end = rental.end_date;
            let message;

            if today < start {
                // nunca empezó: se trata como cancelación
                rental.status = RentalStatus::Cancelled;
                rental.cancelled_at = Some(today);
                rental.used_days = Some(0);
                rental.overdue_days = Some(0);
                rental.total = rust_decimal::Decimal::ZERO;
                message = "Rental cancelled";
            } else if today <= end {
                let used_days = (today - start).num_days().max(1);
                rental.status = RentalStatus::Returned;
                rental.returned_at = Some(today);
                rental.used_days = Some(used_days);
                rental.overdue_days = Some(0);
                // tarifa y descuento congelados al booking
                rental.total =
                    pricing_service::amount_due(rental.rate, used_days, rental.discount);
                message = "Vehicle returned";
            } else {
                let used_days = (end - start).num_days().max(1);
                let overdue_days = (today - end).num_days();
                rental.status = RentalStatus::Returned;
                rental.returned_at = Some(today);
                rental.used_days = Some(used_days);
                // registrados para reporting, no facturados
                rental.overdue_days = Some(overdue_days);
                rental.total =
                    pricing_service::amount_due(rental.rate, used_days, rental.discount);
                message = "Vehicle returned";
            }

            let closed = rental.clone();
            let vehicle_id = closed.vehicle_id;
            if let Some(vehicle) = data.vehicles.get_mut(&vehicle_id) {
                vehicle.status = VehicleStatus::Available;
            }
            info!("rental {} cerrado: {}", rental_id, message);
            Ok(CloseOutcome {
                rental: closed,
                message,
            })
        })
    }

    /// Cancelar un rental antes de que empiece.
    /// - Solo el dueño o staff
    /// - Solo en estado rented
    /// - Estrictamente antes de start
    pub fn cancel_rental(
        &self,
        rental_id: Uuid,
        requester_id: Uuid,
        is_staff: bool,
    ) -> Result<CloseOutcome, AppError> {
        self.cancel_rental_at(rental_id, requester_id, is_staff, today())
    }

    pub fn cancel_rental_at(
        &self,
        rental_id: Uuid,
        requester_id: Uuid,
        is_staff: bool,
        today: NaiveDate,
    ) -> Result<CloseOutcome, AppError> {
        self.store.mutate(|data| {
            let rental = data
                .rentals
                .get_mut(&rental_id)
                .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;

            if rental.renter_id != requester_id && !is_staff {
                return Err(AppError::Forbidden(
                    "Not allowed to cancel this rental".to_string(),
                ));
            }
            if rental.status != RentalStatus::Rented {
                return Err(AppError::NotCancellable);
            }
            if today >= rental.start_date {
                return Err(AppError::AlreadyStarted);
            }

            rental.status = RentalStatus::Cancelled;
            rental.cancelled_at = Some(today);
            rental.used_days = Some(0);
            rental.overdue_days = Some(0);
            rental.total = rust_decimal::Decimal::ZERO;

            info!("rental {} cancelado por {}", rental_id, requester_id);
            Ok(CloseOutcome {
                rental: rental.clone(),
                message: "Rental cancelled",
            })
        })
    }

    /// Factura de un rental - visible para el dueño o staff
    pub fn invoice(
        &self,
        rental_id: Uuid,
        requester_id: Uuid,
        is_staff: bool,
    ) -> Result<Rental, AppError> {
        self.store.read(|data| {
            let rental = data
                .rentals
                .get(&rental_id)
                .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))?;
            if rental.renter_id != requester_id && !is_staff {
                return Err(AppError::Forbidden(
                    "Not allowed to view this invoice".to_string(),
                ));
            }
            Ok(rental.clone())
        })
    }

    /// Rentals de un usuario con el vehículo anotado, más recientes primero
    pub fn rentals_for_user(&self, renter_id: Uuid) -> Vec<RentalHistoryEntry> {
        self.store.read(|data| {
            let mut entries: Vec<RentalHistoryEntry> = data
                .rentals
                .values()
                .filter(|r| r.renter_id == renter_id)
                .map(|r| {
                    let vehicle = data.vehicles.get(&r.vehicle_id);
                    RentalHistoryEntry {
                        rental_id: r.id,
                        vehicle_id: r.vehicle_id,
                        brand: vehicle.map(|v| v.brand.clone()).unwrap_or_default(),
                        model: vehicle.map(|v| v.model.clone()).unwrap_or_default(),
                        vehicle_type: vehicle.map(|v| v.vehicle_type),
                        start_date: r.start_date,
                        end_date: r.end_date,
                        days: r.days,
                        rate: r.rate,
                        discount: r.discount,
                        total: r.total,
                        status: r.status,
                        overdue_days: r.overdue_days,
                        created_at: r.created_at,
                    }
                })
                .collect();
            entries.sort_by(|a, b| b.start_date.cmp(&a.start_date));
            entries
        })
    }
}
