//! Modelo de User
//!
//! Este módulo contiene el struct User y el enum Role.
//! El rol determina la elegibilidad de descuento en el pricing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rol del usuario - conjunto cerrado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Individual,
    Corporate,
    Staff,
}

impl Role {
    /// Parsear un rol desde texto (case-insensitive)
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_lowercase().as_str() {
            "individual" => Some(Role::Individual),
            "corporate" => Some(Role::Corporate),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Individual => "individual",
            Role::Corporate => "corporate",
            Role::Staff => "staff",
        }
    }
}

/// User principal - se persiste en el snapshot del store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_role_is_case_insensitive() {
        assert_eq!(Role::parse("Corporate"), Some(Role::Corporate));
        assert_eq!(Role::parse("  staff "), Some(Role::Staff));
        assert_eq!(Role::parse("admin"), None);
    }
}
