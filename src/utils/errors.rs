//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.
//!
//! Los errores del motor de rentals (conflictos de fechas, transiciones
//! ilegales, permisos) son todos recuperables: el caller muestra el mensaje
//! y permite reintentar. Los fallos de persistencia se propagan sin
//! enmascarar - un `save()` fallido significa que la mutación puede no
//! haberse aplicado de forma durable.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    // --- motor de rentals ---
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid dates (YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("End date must be after start date")]
    InvalidRange,

    #[error("Start date cannot be in the past")]
    PastStartDate,

    #[error("Date conflict with existing rental")]
    DateConflict,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Only active rentals can be cancelled")]
    NotCancellable,

    #[error("Rental has already started, use return instead")]
    AlreadyStarted,

    #[error("Rental already closed")]
    AlreadyClosed,

    // --- ambiente ---
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Código estable que los clientes pueden usar para branchear
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidDate(_) => "INVALID_DATE",
            AppError::InvalidRange => "INVALID_RANGE",
            AppError::PastStartDate => "PAST_START_DATE",
            AppError::DateConflict => "DATE_CONFLICT",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotCancellable => "NOT_CANCELLABLE",
            AppError::AlreadyStarted => "ALREADY_STARTED",
            AppError::AlreadyClosed => "ALREADY_CLOSED",
            AppError::Validation(_) | AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Hash(_) => "HASH_ERROR",
            AppError::Jwt(_) => "JWT_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidDate(_)
            | AppError::InvalidRange
            | AppError::PastStartDate
            | AppError::Validation(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DateConflict
            | AppError::NotCancellable
            | AppError::AlreadyStarted
            | AppError::AlreadyClosed
            | AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Storage(_)
            | AppError::Serialization(_)
            | AppError::Hash(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let details = match &self {
            AppError::Validation(e) => Some(json!(e)),
            _ => None,
        };

        let body = ErrorResponse {
            error: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: self.to_string(),
            details,
            code: self.code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_recoverable_statuses() {
        assert_eq!(AppError::DateConflict.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::PastStartDate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::AlreadyClosed.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::NotFound("rental".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert!(!AppError::DateConflict.status().is_server_error());
    }
}
