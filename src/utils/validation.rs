//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{NaiveDate, Utc};

use crate::utils::errors::AppError;

/// Formato de fecha usado por rentals (start/end)
pub const DATE_FMT: &str = "%Y-%m-%d";

/// Validar y convertir string a fecha
pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FMT)
        .map_err(|_| AppError::InvalidDate(value.to_string()))
}

/// Fecha actual en UTC - único punto de lectura del reloj
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Aceptar /static/... o una URL http(s) absoluta como imagen
pub fn valid_image_path(value: &str) -> bool {
    let s = value.trim();
    if s.starts_with("/static/") {
        return true;
    }
    if let Some(rest) = s.strip_prefix("https://").or_else(|| s.strip_prefix("http://")) {
        return !rest.is_empty() && !rest.starts_with('/');
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_days() {
        assert_eq!(
            parse_date("2030-01-10").unwrap(),
            NaiveDate::from_ymd_opt(2030, 1, 10).unwrap()
        );
        assert_eq!(parse_date(" 2030-01-10 ").unwrap().to_string(), "2030-01-10");
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(matches!(parse_date("10/01/2030"), Err(AppError::InvalidDate(_))));
        assert!(matches!(parse_date(""), Err(AppError::InvalidDate(_))));
        assert!(matches!(parse_date("2030-13-40"), Err(AppError::InvalidDate(_))));
    }

    #[test]
    fn image_paths() {
        assert!(valid_image_path("/static/images/car.png"));
        assert!(valid_image_path("https://cdn.example.com/car.png"));
        assert!(valid_image_path("http://cdn.example.com/car.png"));
        assert!(!valid_image_path(""));
        assert!(!valid_image_path("car.png"));
        assert!(!valid_image_path("ftp://cdn.example.com/car.png"));
    }
}
