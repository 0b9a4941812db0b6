//! Capa de persistencia
//!
//! Snapshot JSON en disco con replace atómico y lock grueso en memoria.

pub mod store;

pub use store::{Store, StoreData, SCHEMA_VERSION};
