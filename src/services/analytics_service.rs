//! Agregaciones para dashboards y analytics de staff

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::database::Store;
use crate::models::Role;
use crate::services::pricing_service::round2;

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsTotals {
    pub users: usize,
    pub vehicles: usize,
    pub rentals: usize,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleRentalCount {
    pub vehicle_id: Uuid,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleCount {
    pub role: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub totals: AnalyticsTotals,
    pub rentals_by_vehicle: Vec<VehicleRentalCount>,
    pub revenue_by_date: Vec<RevenuePoint>,
    pub users_by_role: Vec<RoleCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RentalCount {
    pub vehicle_id: Uuid,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub total_vehicles: usize,
    pub total_users: usize,
    pub total_rentals: usize,
    pub revenue: Decimal,
    pub most_rented: Vec<RentalCount>,
    pub least_rented: Vec<RentalCount>,
}

pub struct AnalyticsService {
    store: Arc<Store>,
}

impl AnalyticsService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Resumen rápido: totales + top/bottom cinco vehículos por cantidad
    pub fn summary(&self) -> AnalyticsSummary {
        self.store.read(|data| {
            let mut counts: HashMap<Uuid, usize> = HashMap::new();
            let mut revenue = Decimal::ZERO;
            for rental in data.rentals.values() {
                *counts.entry(rental.vehicle_id).or_default() += 1;
                revenue += rental.total;
            }

            // orden estable: count primero, id como desempate
            let mut ranked: Vec<RentalCount> = counts
                .into_iter()
                .map(|(vehicle_id, count)| RentalCount { vehicle_id, count })
                .collect();
            ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.vehicle_id.cmp(&b.vehicle_id)));

            let most_rented = ranked.iter().take(5).cloned().collect();
            let least_rented = {
                let mut asc = ranked;
                asc.reverse();
                asc.into_iter().take(5).collect()
            };

            AnalyticsSummary {
                total_vehicles: data.vehicles.len(),
                total_users: data.users.len(),
                total_rentals: data.rentals.len(),
                revenue: round2(revenue),
                most_rented,
                least_rented,
            }
        })
    }

    /// Reporte completo para el dashboard de staff
    pub fn report(&self) -> AnalyticsReport {
        self.store.read(|data| {
            let revenue = round2(data.rentals.values().map(|r| r.total).sum());

            let mut counts: HashMap<Uuid, usize> = HashMap::new();
            for rental in data.rentals.values() {
                *counts.entry(rental.vehicle_id).or_default() += 1;
            }
            let mut rentals_by_vehicle: Vec<VehicleRentalCount> = data
                .vehicles
                .iter()
                .map(|(id, v)| {
                    let label = format!("{} {}", v.brand, v.model).trim().to_string();
                    VehicleRentalCount {
                        vehicle_id: *id,
                        label: if label.is_empty() {
                            id.to_string()[..6].to_string()
                        } else {
                            label
                        },
                        count: counts.get(id).copied().unwrap_or(0),
                    }
                })
                .collect();
            rentals_by_vehicle
                .sort_by(|a, b| b.count.cmp(&a.count).then(a.vehicle_id.cmp(&b.vehicle_id)));

            // revenue agrupado por fecha de inicio del rental
            let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
            for rental in data.rentals.values() {
                *by_date.entry(rental.start_date).or_insert(Decimal::ZERO) += rental.total;
            }
            let revenue_by_date = by_date
                .into_iter()
                .map(|(date, total)| RevenuePoint {
                    date,
                    total: round2(total),
                })
                .collect();

            let users_by_role = [Role::Individual, Role::Corporate, Role::Staff]
                .into_iter()
                .map(|role| RoleCount {
                    role: role.as_str(),
                    count: data.users.values().filter(|u| u.role == role).count(),
                })
                .collect();

            AnalyticsReport {
                totals: AnalyticsTotals {
                    users: data.users.len(),
                    vehicles: data.vehicles.len(),
                    rentals: data.rentals.len(),
                    revenue,
                },
                rentals_by_vehicle,
                revenue_by_date,
                users_by_role,
            }
        })
    }
}
