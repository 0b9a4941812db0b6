//! Registro y login

use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::info;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::database::Store;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::dto::user_dto::UserResponse;
use crate::models::{Role, User};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_token;

pub struct AuthController {
    store: Arc<Store>,
    config: EnvironmentConfig,
}

impl AuthController {
    pub fn new(store: Arc<Store>, config: EnvironmentConfig) -> Self {
        Self { store, config }
    }

    /// Registro público: solo individual o corporate.
    /// Las cuentas de staff las crea otro staff desde su panel.
    pub fn register(&self, request: RegisterRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        let role = match Role::parse(&request.role) {
            Some(Role::Individual) => Role::Individual,
            Some(Role::Corporate) => Role::Corporate,
            _ => {
                return Err(AppError::ValidationError(
                    "Role must be individual or corporate".to_string(),
                ))
            }
        };
        let username = request.username.trim().to_string();

        let password_hash =
            hash(&request.password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;

        self.store.mutate(|data| {
            if data.user_exists(&username) {
                return Err(AppError::Conflict("Username already exists".to_string()));
            }
            let user = User::new(username.clone(), password_hash.clone(), role);
            let response = UserResponse::from(&user);
            info!("registro de {} como {}", user.username, role.as_str());
            data.users.insert(user.id, user);
            Ok(response)
        })
    }

    pub fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .store
            .read(|data| data.find_user_by_username(request.username.trim()).cloned())
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        // un hash ilegible cuenta como credencial inválida
        let valid = verify(&request.password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = create_token(user.id, user.role, &self.config)?;
        info!("login de {}", user.username);
        Ok(LoginResponse {
            token,
            user: UserResponse::from(&user),
        })
    }
}
