//! Disponibilidad de vehículos
//!
//! Chequeo de solape sobre intervalos half-open [start, end): la fecha de
//! fin es exclusiva, así que un rental que termina el día D y otro que
//! empieza el día D no entran en conflicto (bookings back-to-back legales).

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::database::StoreData;

/// Solape entre [a_start, a_end) y [b_start, b_end)
pub fn overlaps(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// ¿El intervalo candidato choca con algún rental activo del vehículo?
/// Solo cuentan los rentals en estado rented/overdue; los terminales no.
pub fn has_conflict(
    data: &StoreData,
    vehicle_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> bool {
    data.rentals.values().any(|r| {
        r.vehicle_id == vehicle_id
            && r.status.is_active()
            && overlaps(start, end, r.start_date, r.end_date)
    })
}

/// Rango reservado para el calendario de disponibilidad
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookedRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Rangos activos del vehículo, ordenados por fecha de inicio.
/// La UI los usa para deshabilitar fechas ya reservadas.
pub fn availability_calendar(data: &StoreData, vehicle_id: Uuid) -> Vec<BookedRange> {
    let mut ranges: Vec<BookedRange> = data
        .rentals
        .values()
        .filter(|r| r.vehicle_id == vehicle_id && r.status.is_active())
        .map(|r| BookedRange {
            start_date: r.start_date,
            end_date: r.end_date,
        })
        .collect();
    ranges.sort_by_key(|r| r.start_date);
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            ("2030-01-10", "2030-01-15", "2030-01-14", "2030-01-20", true),
            ("2030-01-10", "2030-01-15", "2030-01-01", "2030-01-11", true),
            ("2030-01-10", "2030-01-15", "2030-01-11", "2030-01-12", true),
            ("2030-01-10", "2030-01-15", "2030-01-20", "2030-01-25", false),
        ];
        for (a1, a2, b1, b2, expected) in cases {
            assert_eq!(overlaps(d(a1), d(a2), d(b1), d(b2)), expected);
            assert_eq!(overlaps(d(b1), d(b2), d(a1), d(a2)), expected);
        }
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        // termina el 15, empieza el 15: back-to-back legal
        assert!(!overlaps(
            d("2030-01-10"),
            d("2030-01-15"),
            d("2030-01-15"),
            d("2030-01-18")
        ));
    }

    #[test]
    fn single_day_ranges() {
        assert!(overlaps(
            d("2030-01-10"),
            d("2030-01-11"),
            d("2030-01-10"),
            d("2030-01-11")
        ));
        assert!(!overlaps(
            d("2030-01-10"),
            d("2030-01-11"),
            d("2030-01-11"),
            d("2030-01-12")
        ));
    }
}
