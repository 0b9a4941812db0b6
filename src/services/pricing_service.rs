//! Política de precios
//!
//! Función pura: (tarifa listada, categoría, duración, rol) -> total.
//! El descuento por rol y el multiplicador por categoría son tablas
//! cerradas; nada de dispatch virtual.
//!
//! Reglas de descuento:
//!   - corporate: 15% flat
//!   - individual: 10% cuando days >= 7
//!   - staff: sin regla especial (decisión documentada en DESIGN.md)

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{Role, VehicleType};

/// Días mínimos para que un individual acceda al descuento por duración
pub const LONG_RENTAL_MIN_DAYS: i64 = 7;

/// Redondeo monetario: 2 decimales, half-up
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Ratio de descuento en [0, 1] según rol y duración
pub fn discount_ratio(role: Role, days: i64) -> Decimal {
    match role {
        Role::Corporate => Decimal::new(15, 2),
        Role::Individual if days >= LONG_RENTAL_MIN_DAYS => Decimal::new(10, 2),
        _ => Decimal::ZERO,
    }
}

/// Multiplicador de la tarifa listada por categoría
pub fn category_multiplier(vehicle_type: VehicleType) -> Decimal {
    match vehicle_type {
        VehicleType::Car => Decimal::ONE,
        VehicleType::Motorbike => Decimal::new(9, 1),
        VehicleType::Truck => Decimal::new(12, 1),
    }
}

/// Tarifa efectiva por día: listada x multiplicador, redondeada a moneda.
/// Esta es la tarifa que se congela dentro del rental.
pub fn effective_rate(listed_rate: Decimal, vehicle_type: VehicleType) -> Decimal {
    round2(listed_rate * category_multiplier(vehicle_type))
}

/// Importe a cobrar con tarifa y descuento ya congelados
pub fn amount_due(rate: Decimal, days: i64, discount: Decimal) -> Decimal {
    round2(rate * Decimal::from(days) * (Decimal::ONE - discount))
}

/// Cotización completa de un booking
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PriceQuote {
    pub days: i64,
    /// Tarifa efectiva por día (multiplicador de categoría incluido)
    pub rate: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

pub fn quote(
    listed_rate: Decimal,
    vehicle_type: VehicleType,
    days: i64,
    role: Role,
) -> PriceQuote {
    let rate = effective_rate(listed_rate, vehicle_type);
    let discount = discount_ratio(role, days);
    PriceQuote {
        days,
        rate,
        discount,
        total: amount_due(rate, days, discount),
    }
}
