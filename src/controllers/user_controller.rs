//! Administración de usuarios (staff)

use std::sync::Arc;

use bcrypt::{hash, DEFAULT_COST};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::database::Store;
use crate::dto::user_dto::{CreateUserRequest, UserResponse};
use crate::models::{Role, User};
use crate::utils::errors::AppError;

pub struct UserController {
    store: Arc<Store>,
}

impl UserController {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Alta con cualquier rol, username único
    pub fn create(&self, request: CreateUserRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        let role = Role::parse(&request.role).ok_or_else(|| {
            AppError::ValidationError("Role must be individual/corporate/staff".to_string())
        })?;
        let username = request.username.trim().to_string();

        let password_hash =
            hash(&request.password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;

        self.store.mutate(|data| {
            if data.user_exists(&username) {
                return Err(AppError::Conflict("Username exists".to_string()));
            }
            let user = User::new(username.clone(), password_hash.clone(), role);
            let response = UserResponse::from(&user);
            info!("usuario {} creado con rol {}", user.username, role.as_str());
            data.users.insert(user.id, user);
            Ok(response)
        })
    }

    /// Baja sin cascada: los rentals históricos conservan el renter_id
    /// aunque quede colgando - son registros de auditoría.
    pub fn delete(&self, user_id: Uuid) -> Result<(), AppError> {
        self.store.mutate(|data| {
            if data.users.remove(&user_id).is_none() {
                return Err(AppError::NotFound("User not found".to_string()));
            }
            info!("usuario {} eliminado", user_id);
            Ok(())
        })
    }

    pub fn list(&self) -> Vec<UserResponse> {
        self.store.read(|data| {
            let mut users: Vec<UserResponse> =
                data.users.values().map(UserResponse::from).collect();
            users.sort_by(|a, b| a.username.cmp(&b.username));
            users
        })
    }
}
