//! Utilidades JWT
//!
//! Este módulo contiene funciones helper para emitir y validar los
//! bearer tokens que identifican al usuario y su rol.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::environment::EnvironmentConfig, models::Role, utils::errors::AppError};

/// Claims del JWT token
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,  // user_id
    pub role: String, // individual | corporate | staff
    pub exp: usize,   // expiration timestamp
    pub iat: usize,   // issued at timestamp
}

/// Generar JWT token para un usuario
pub fn create_token(
    user_id: Uuid,
    role: Role,
    config: &EnvironmentConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(config.jwt_expiration as i64);

    let claims = JwtClaims {
        sub: user_id.to_string(),
        role: role.as_str().to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
    .map_err(|e| AppError::Jwt(e.to_string()))
}

/// Validar un token y extraer (user_id, role)
pub fn verify_token(token: &str, config: &EnvironmentConfig) -> Result<(Uuid, Role), AppError> {
    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| AppError::Jwt(e.to_string()))?;

    let user_id = Uuid::parse_str(&data.claims.sub)
        .map_err(|_| AppError::Jwt("invalid subject claim".to_string()))?;
    let role = Role::parse(&data.claims.role)
        .ok_or_else(|| AppError::Jwt("invalid role claim".to_string()))?;

    Ok((user_id, role))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> EnvironmentConfig {
        EnvironmentConfig {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 3600,
            data_path: "data.json".to_string(),
            cors_origins: vec![],
        }
    }

    #[test]
    fn token_round_trip() {
        let config = test_config();
        let id = Uuid::new_v4();
        let token = create_token(id, Role::Corporate, &config).unwrap();
        let (decoded_id, role) = verify_token(&token, &config).unwrap();
        assert_eq!(decoded_id, id);
        assert_eq!(role, Role::Corporate);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let config = test_config();
        let token = create_token(Uuid::new_v4(), Role::Staff, &config).unwrap();
        let mut other = test_config();
        other.jwt_secret = "other-secret".to_string();
        assert!(matches!(verify_token(&token, &other), Err(AppError::Jwt(_))));
    }
}
