//! Servicios del dominio
//!
//! Lógica pura (pricing, disponibilidad) y procesos de mantenimiento
//! (reconciliador de estados, analytics).

pub mod analytics_service;
pub mod availability_service;
pub mod pricing_service;
pub mod reconciler_service;
