//! Reconciliador de estados
//!
//! Dos operaciones idempotentes, seguras de correr repetidas veces:
//! marcar rentals vencidos como overdue y reconstruir el status snapshot
//! de cada vehículo como función pura del conjunto de rentals.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::database::Store;
use crate::models::{RentalStatus, VehicleStatus};
use crate::utils::errors::AppError;
use crate::utils::validation::today;

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    /// Rentals que pasaron de rented a overdue en esta corrida
    pub overdue_flagged: usize,
    pub vehicles_reconciled: usize,
}

pub struct ReconcilerService {
    store: Arc<Store>,
}

impl ReconcilerService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Rentals aún `rented` con end < today pasan a `overdue`,
    /// y su vehículo queda marcado overdue.
    pub fn refresh_overdue_flags(&self) -> Result<usize, AppError> {
        self.refresh_overdue_flags_at(today())
    }

    pub fn refresh_overdue_flags_at(&self, today: NaiveDate) -> Result<usize, AppError> {
        self.store.mutate(|data| {
            let mut flagged = 0;
            let overdue_vehicles: Vec<_> = data
                .rentals
                .values_mut()
                .filter(|r| r.status == RentalStatus::Rented && r.end_date < today)
                .map(|r| {
                    r.status = RentalStatus::Overdue;
                    flagged += 1;
                    r.vehicle_id
                })
                .collect();

            for vehicle_id in overdue_vehicles {
                if let Some(vehicle) = data.vehicles.get_mut(&vehicle_id) {
                    vehicle.status = VehicleStatus::Overdue;
                }
            }
            Ok(flagged)
        })
    }

    /// Rebuild completo del status snapshot de los vehículos.
    /// Overdue tiene prioridad sobre rented y nunca se degrada;
    /// rented solo aplica mientras start <= today < end.
    pub fn reconcile_vehicle_statuses(&self) -> Result<usize, AppError> {
        self.reconcile_vehicle_statuses_at(today())
    }

    pub fn reconcile_vehicle_statuses_at(&self, today: NaiveDate) -> Result<usize, AppError> {
        self.store.mutate(|data| {
            for vehicle in data.vehicles.values_mut() {
                vehicle.status = VehicleStatus::Available;
            }

            let rentals: Vec<_> = data
                .rentals
                .values()
                .map(|r| (r.vehicle_id, r.status, r.start_date, r.end_date))
                .collect();

            for (vehicle_id, status, start, end) in rentals {
                let Some(vehicle) = data.vehicles.get_mut(&vehicle_id) else {
                    continue;
                };
                match status {
                    RentalStatus::Overdue => vehicle.status = VehicleStatus::Overdue,
                    RentalStatus::Rented if start <= today && today < end => {
                        if vehicle.status != VehicleStatus::Overdue {
                            vehicle.status = VehicleStatus::Rented;
                        }
                    }
                    _ => {}
                }
            }
            Ok(data.vehicles.len())
        })
    }

    /// Corrida completa: flags de overdue primero, rebuild después.
    pub fn run(&self) -> Result<ReconcileReport, AppError> {
        self.run_at(today())
    }

    pub fn run_at(&self, today: NaiveDate) -> Result<ReconcileReport, AppError> {
        let overdue_flagged = self.refresh_overdue_flags_at(today)?;
        let vehicles_reconciled = self.reconcile_vehicle_statuses_at(today)?;
        if overdue_flagged > 0 {
            info!("reconciler: {} rentals marcados overdue", overdue_flagged);
        }
        Ok(ReconcileReport {
            overdue_flagged,
            vehicles_reconciled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rental, Role, User, Vehicle, VehicleType, PLACEHOLDER_IMAGE};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn open_store(dir: &tempfile::TempDir) -> Arc<Store> {
        Arc::new(Store::open(dir.path().join("data.json")).unwrap())
    }

    fn insert_vehicle(store: &Store) -> Uuid {
        store
            .mutate(|data| {
                let v = Vehicle::new(
                    "Ford".to_string(),
                    "Ranger".to_string(),
                    VehicleType::Truck,
                    Decimal::from(80),
                    PLACEHOLDER_IMAGE.to_string(),
                );
                let id = v.id;
                data.vehicles.insert(id, v);
                Ok(id)
            })
            .unwrap()
    }

    fn insert_rental(
        store: &Store,
        vehicle_id: Uuid,
        start: &str,
        end: &str,
        status: RentalStatus,
    ) -> Uuid {
        store
            .mutate(|data| {
                let renter = User::new("renter".to_string(), "x".to_string(), Role::Individual);
                let renter_id = renter.id;
                data.users.insert(renter_id, renter);
                let rental = Rental {
                    id: Uuid::new_v4(),
                    renter_id,
                    vehicle_id,
                    start_date: d(start),
                    end_date: d(end),
                    days: (d(end) - d(start)).num_days(),
                    rate: Decimal::from(80),
                    discount: Decimal::ZERO,
                    total: Decimal::from(80),
                    status,
                    created_at: Utc::now(),
                    returned_at: None,
                    cancelled_at: None,
                    used_days: None,
                    overdue_days: None,
                };
                let id = rental.id;
                data.rentals.insert(id, rental);
                Ok(id)
            })
            .unwrap()
    }

    #[test]
    fn expired_rented_rentals_become_overdue() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let vehicle_id = insert_vehicle(&store);
        let rental_id = insert_rental(&store, vehicle_id, "2030-01-01", "2030-01-05", RentalStatus::Rented);

        let reconciler = ReconcilerService::new(store.clone());
        let flagged = reconciler.refresh_overdue_flags_at(d("2030-01-06")).unwrap();

        assert_eq!(flagged, 1);
        store.read(|data| {
            assert_eq!(data.rentals[&rental_id].status, RentalStatus::Overdue);
            assert_eq!(data.vehicles[&vehicle_id].status, VehicleStatus::Overdue);
        });

        // segunda corrida: nada nuevo que marcar
        assert_eq!(reconciler.refresh_overdue_flags_at(d("2030-01-06")).unwrap(), 0);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let current = insert_vehicle(&store);
        let idle = insert_vehicle(&store);
        let late = insert_vehicle(&store);
        insert_rental(&store, current, "2030-01-05", "2030-01-10", RentalStatus::Rented);
        insert_rental(&store, late, "2030-01-01", "2030-01-03", RentalStatus::Overdue);
        // rental terminado no cuenta
        insert_rental(&store, idle, "2030-01-01", "2030-01-03", RentalStatus::Returned);

        let reconciler = ReconcilerService::new(store.clone());
        let today = d("2030-01-06");
        reconciler.reconcile_vehicle_statuses_at(today).unwrap();

        let snapshot = |s: &Store| {
            s.read(|data| {
                (
                    data.vehicles[&current].status,
                    data.vehicles[&idle].status,
                    data.vehicles[&late].status,
                )
            })
        };

        let first = snapshot(&store);
        assert_eq!(
            first,
            (
                VehicleStatus::Rented,
                VehicleStatus::Available,
                VehicleStatus::Overdue
            )
        );

        reconciler.reconcile_vehicle_statuses_at(today).unwrap();
        assert_eq!(snapshot(&store), first);
    }

    #[test]
    fn overdue_wins_over_rented_on_the_same_vehicle() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let vehicle_id = insert_vehicle(&store);
        // back-to-back: uno vencido overdue, otro corriendo hoy
        insert_rental(&store, vehicle_id, "2030-01-01", "2030-01-05", RentalStatus::Overdue);
        insert_rental(&store, vehicle_id, "2030-01-05", "2030-01-10", RentalStatus::Rented);

        let reconciler = ReconcilerService::new(store.clone());
        reconciler.reconcile_vehicle_statuses_at(d("2030-01-06")).unwrap();

        store.read(|data| {
            assert_eq!(data.vehicles[&vehicle_id].status, VehicleStatus::Overdue);
        });
    }

    #[test]
    fn future_rented_rental_leaves_vehicle_available() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let vehicle_id = insert_vehicle(&store);
        insert_rental(&store, vehicle_id, "2030-02-01", "2030-02-05", RentalStatus::Rented);

        ReconcilerService::new(store.clone())
            .reconcile_vehicle_statuses_at(d("2030-01-06"))
            .unwrap();

        store.read(|data| {
            assert_eq!(data.vehicles[&vehicle_id].status, VehicleStatus::Available);
        });
    }
}
