//! Store persistente del sistema
//!
//! Mantiene las tres colecciones (users, vehicles, rentals) en memoria bajo
//! un único RwLock grueso y las persiste write-through como snapshot JSON.
//! El save es un replace atómico: se escribe a un archivo temporal y luego
//! se renombra sobre el anterior. La recuperación ante un crash es recargar
//! el último snapshot guardado; solo se pierde la operación en vuelo.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use bcrypt::{hash, DEFAULT_COST};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::models::{Rental, Role, User, Vehicle};
use crate::utils::errors::AppError;

/// Versión del schema del snapshot - un mismatch se detecta al cargar,
/// no como key faltante en tiempo de lectura
pub const SCHEMA_VERSION: u32 = 1;

/// Credenciales del staff sembrado cuando el snapshot no trae ninguno
const SEED_STAFF_USERNAME: &str = "staff";
const SEED_STAFF_PASSWORD: &str = "Staff123";

/// Estado completo persistido
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreData {
    pub schema_version: u32,
    pub users: HashMap<Uuid, User>,
    pub vehicles: HashMap<Uuid, Vehicle>,
    pub rentals: HashMap<Uuid, Rental>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            users: HashMap::new(),
            vehicles: HashMap::new(),
            rentals: HashMap::new(),
        }
    }
}

impl StoreData {
    pub fn find_user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|u| u.username == username)
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.find_user_by_username(username).is_some()
    }

    /// La fuente de verdad de disponibilidad son los rentals, no el
    /// status snapshot del vehículo
    pub fn has_active_rental(&self, vehicle_id: Uuid) -> bool {
        self.rentals
            .values()
            .any(|r| r.vehicle_id == vehicle_id && r.status.is_active())
    }
}

/// Repositorio key-value con lock grueso de un solo escritor
pub struct Store {
    path: PathBuf,
    data: RwLock<StoreData>,
}

impl Store {
    /// Abrir (o crear) el snapshot en `path`. Siembra un usuario staff si el
    /// snapshot no trae ninguno, igual que hacía el almacén original.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let mut data = if path.exists() {
            Self::load(&path)?
        } else {
            StoreData::default()
        };

        if !data.users.values().any(|u| u.role == Role::Staff) {
            let password_hash = hash(SEED_STAFF_PASSWORD, DEFAULT_COST)
                .map_err(|e| AppError::Hash(e.to_string()))?;
            let staff = User::new(SEED_STAFF_USERNAME.to_string(), password_hash, Role::Staff);
            info!("seeding default staff user '{}'", staff.username);
            data.users.insert(staff.id, staff);
        }

        Self::persist(&path, &data)?;
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn load(path: &Path) -> Result<StoreData, AppError> {
        let bytes = fs::read(path)?;
        let data: StoreData = serde_json::from_slice(&bytes)?;
        if data.schema_version != SCHEMA_VERSION {
            return Err(AppError::Internal(format!(
                "snapshot schema version {} not supported (expected {})",
                data.schema_version, SCHEMA_VERSION
            )));
        }
        Ok(data)
    }

    /// Lectura bajo el lock compartido
    pub fn read<R>(&self, f: impl FnOnce(&StoreData) -> R) -> R {
        let guard = self.data.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Mutación bajo el lock exclusivo, con persistencia write-through antes
    /// de soltar el lock. Convención: el closure valida primero y muta al
    /// final, así un Err no deja estado en memoria a medio aplicar.
    pub fn mutate<R>(
        &self,
        f: impl FnOnce(&mut StoreData) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut guard)?;
        Self::persist(&self.path, &guard)?;
        Ok(result)
    }

    /// Escribir a <path>.tmp y renombrar de forma atómica sobre el snapshot
    fn persist(path: &Path, data: &StoreData) -> Result<(), AppError> {
        let tmp = path.with_extension("tmp");
        let bytes = serde_json::to_vec_pretty(data)?;
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
