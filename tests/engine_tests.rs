//! Escenarios del motor de rentals con fechas inyectadas.
//!
//! Se usa la variante `*_at` de cada operación para fijar el "hoy" del
//! motor y dejar los escenarios determinísticos.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use vehicle_rental::controllers::rental_controller::RentalController;
use vehicle_rental::database::Store;
use vehicle_rental::models::{
    RentalStatus, Role, User, Vehicle, VehicleStatus, VehicleType, PLACEHOLDER_IMAGE,
};
use vehicle_rental::services::reconciler_service::ReconcilerService;
use vehicle_rental::utils::errors::AppError;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

struct Fixture {
    _dir: tempfile::TempDir,
    store: Arc<Store>,
    rentals: RentalController,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(Store::open(dir.path().join("data.json")).unwrap());
    let rentals = RentalController::new(store.clone());
    Fixture {
        _dir: dir,
        store,
        rentals,
    }
}

fn add_user(store: &Store, username: &str, role: Role) -> Uuid {
    store
        .mutate(|data| {
            // el motor no verifica el hash, alcanza un placeholder
            let user = User::new(username.to_string(), "hash".to_string(), role);
            let id = user.id;
            data.users.insert(id, user);
            Ok(id)
        })
        .unwrap()
}

fn add_vehicle(store: &Store, vehicle_type: VehicleType, rate: i64) -> Uuid {
    store
        .mutate(|data| {
            let vehicle = Vehicle::new(
                "Toyota".to_string(),
                "Hilux".to_string(),
                vehicle_type,
                Decimal::from(rate),
                PLACEHOLDER_IMAGE.to_string(),
            );
            let id = vehicle.id;
            data.vehicles.insert(id, vehicle);
            Ok(id)
        })
        .unwrap()
}

const TODAY: &str = "2030-01-01";

#[test]
fn corporate_booking_gets_fifteen_percent_off() {
    let fx = fixture();
    let renter = add_user(&fx.store, "acme", Role::Corporate);
    let vehicle = add_vehicle(&fx.store, VehicleType::Car, 100);

    let rental = fx
        .rentals
        .rent_at(renter, vehicle, "2030-01-10", "2030-01-15", d(TODAY))
        .unwrap();

    assert_eq!(rental.days, 5);
    assert_eq!(rental.rate, dec("100.00"));
    assert_eq!(rental.discount, dec("0.15"));
    assert_eq!(rental.total, dec("425.00"));
    assert_eq!(rental.status, RentalStatus::Rented);

    fx.store.read(|data| {
        assert_eq!(data.vehicles[&vehicle].status, VehicleStatus::Rented);
    });
}

#[test]
fn overlapping_booking_is_rejected_and_touching_is_accepted() {
    let fx = fixture();
    let renter = add_user(&fx.store, "acme", Role::Corporate);
    let other = add_user(&fx.store, "bob", Role::Individual);
    let vehicle = add_vehicle(&fx.store, VehicleType::Car, 100);

    fx.rentals
        .rent_at(renter, vehicle, "2030-01-10", "2030-01-15", d(TODAY))
        .unwrap();

    // solape parcial: rechazado
    let conflict = fx
        .rentals
        .rent_at(other, vehicle, "2030-01-14", "2030-01-20", d(TODAY));
    assert!(matches!(conflict, Err(AppError::DateConflict)));

    // empieza el mismo día que termina el anterior: back-to-back legal
    let touching = fx
        .rentals
        .rent_at(other, vehicle, "2030-01-15", "2030-01-18", d(TODAY))
        .unwrap();
    assert_eq!(touching.days, 3);
}

#[test]
fn booking_validation_errors() {
    let fx = fixture();
    let renter = add_user(&fx.store, "bob", Role::Individual);
    let vehicle = add_vehicle(&fx.store, VehicleType::Car, 50);
    let today = d(TODAY);

    assert!(matches!(
        fx.rentals.rent_at(renter, vehicle, "2029-12-30", "2030-01-05", today),
        Err(AppError::PastStartDate)
    ));
    assert!(matches!(
        fx.rentals.rent_at(renter, vehicle, "2030-01-10", "2030-01-10", today),
        Err(AppError::InvalidRange)
    ));
    assert!(matches!(
        fx.rentals.rent_at(renter, vehicle, "2030-01-12", "2030-01-10", today),
        Err(AppError::InvalidRange)
    ));
    assert!(matches!(
        fx.rentals.rent_at(renter, vehicle, "10/01/2030", "2030-01-12", today),
        Err(AppError::InvalidDate(_))
    ));
    assert!(matches!(
        fx.rentals.rent_at(Uuid::new_v4(), vehicle, "2030-01-10", "2030-01-12", today),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        fx.rentals.rent_at(renter, Uuid::new_v4(), "2030-01-10", "2030-01-12", today),
        Err(AppError::NotFound(_))
    ));

    // nada quedó persistido
    fx.store.read(|data| assert!(data.rentals.is_empty()));
}

#[test]
fn individual_discount_kicks_in_at_seven_days() {
    let fx = fixture();
    let renter = add_user(&fx.store, "bob", Role::Individual);
    let vehicle_a = add_vehicle(&fx.store, VehicleType::Car, 100);
    let vehicle_b = add_vehicle(&fx.store, VehicleType::Car, 100);

    let six = fx
        .rentals
        .rent_at(renter, vehicle_a, "2030-01-10", "2030-01-16", d(TODAY))
        .unwrap();
    assert_eq!(six.discount, Decimal::ZERO);
    assert_eq!(six.total, dec("600.00"));

    let seven = fx
        .rentals
        .rent_at(renter, vehicle_b, "2030-01-10", "2030-01-17", d(TODAY))
        .unwrap();
    assert_eq!(seven.discount, dec("0.10"));
    assert_eq!(seven.total, dec("630.00"));
}

#[test]
fn rate_change_after_booking_does_not_alter_the_total() {
    let fx = fixture();
    let renter = add_user(&fx.store, "acme", Role::Corporate);
    let vehicle = add_vehicle(&fx.store, VehicleType::Car, 100);

    let rental = fx
        .rentals
        .rent_at(renter, vehicle, "2030-01-10", "2030-01-20", d(TODAY))
        .unwrap();

    // el staff sube la tarifa listada después del booking
    fx.store
        .mutate(|data| {
            data.vehicles.get_mut(&vehicle).unwrap().rate = Decimal::from(999);
            Ok(())
        })
        .unwrap();

    // devolución a mitad del período: 5 días usados a la tarifa congelada
    let outcome = fx
        .rentals
        .return_vehicle_at(rental.id, d("2030-01-15"))
        .unwrap();
    assert_eq!(outcome.rental.used_days, Some(5));
    assert_eq!(outcome.rental.total, dec("425.00"));
}

#[test]
fn same_day_return_still_charges_one_day() {
    let fx = fixture();
    let renter = add_user(&fx.store, "bob", Role::Individual);
    let vehicle = add_vehicle(&fx.store, VehicleType::Car, 80);

    let rental = fx
        .rentals
        .rent_at(renter, vehicle, "2030-01-10", "2030-01-12", d(TODAY))
        .unwrap();

    let outcome = fx
        .rentals
        .return_vehicle_at(rental.id, d("2030-01-10"))
        .unwrap();

    assert_eq!(outcome.message, "Vehicle returned");
    assert_eq!(outcome.rental.status, RentalStatus::Returned);
    assert_eq!(outcome.rental.used_days, Some(1));
    assert_eq!(outcome.rental.total, dec("80.00"));
}

#[test]
fn late_return_records_overdue_days_but_bills_only_to_end() {
    let fx = fixture();
    let renter = add_user(&fx.store, "bob", Role::Individual);
    let vehicle = add_vehicle(&fx.store, VehicleType::Car, 100);

    let rental = fx
        .rentals
        .rent_at(renter, vehicle, "2030-01-02", "2030-01-07", d(TODAY))
        .unwrap();

    // tres días tarde
    let outcome = fx
        .rentals
        .return_vehicle_at(rental.id, d("2030-01-10"))
        .unwrap();

    assert_eq!(outcome.rental.status, RentalStatus::Returned);
    assert_eq!(outcome.rental.used_days, Some(5));
    assert_eq!(outcome.rental.overdue_days, Some(3));
    assert_eq!(outcome.rental.total, dec("500.00"));

    fx.store.read(|data| {
        assert_eq!(data.vehicles[&vehicle].status, VehicleStatus::Available);
    });
}

#[test]
fn returning_before_start_cancels_without_charge() {
    let fx = fixture();
    let renter = add_user(&fx.store, "acme", Role::Corporate);
    let vehicle = add_vehicle(&fx.store, VehicleType::Car, 100);

    let rental = fx
        .rentals
        .rent_at(renter, vehicle, "2030-01-10", "2030-01-15", d(TODAY))
        .unwrap();

    let outcome = fx
        .rentals
        .return_vehicle_at(rental.id, d("2030-01-05"))
        .unwrap();

    assert_eq!(outcome.message, "Rental cancelled");
    assert_eq!(outcome.rental.status, RentalStatus::Cancelled);
    assert_eq!(outcome.rental.total, Decimal::ZERO);
    assert_eq!(outcome.rental.cancelled_at, Some(d("2030-01-05")));
    assert_eq!(outcome.rental.used_days, Some(0));
}

#[test]
fn terminal_rentals_reject_further_transitions() {
    let fx = fixture();
    let renter = add_user(&fx.store, "bob", Role::Individual);
    let vehicle = add_vehicle(&fx.store, VehicleType::Car, 100);

    let rental = fx
        .rentals
        .rent_at(renter, vehicle, "2030-01-02", "2030-01-05", d(TODAY))
        .unwrap();
    fx.rentals
        .return_vehicle_at(rental.id, d("2030-01-04"))
        .unwrap();

    assert!(matches!(
        fx.rentals.return_vehicle_at(rental.id, d("2030-01-04")),
        Err(AppError::AlreadyClosed)
    ));
    assert!(matches!(
        fx.rentals
            .cancel_rental_at(rental.id, renter, false, d("2030-01-04")),
        Err(AppError::NotCancellable)
    ));
}

#[test]
fn cancel_rules_owner_staff_and_timing() {
    let fx = fixture();
    let owner = add_user(&fx.store, "bob", Role::Individual);
    let stranger = add_user(&fx.store, "eve", Role::Individual);
    let vehicle = add_vehicle(&fx.store, VehicleType::Car, 100);
    let today = d(TODAY);

    let rental = fx
        .rentals
        .rent_at(owner, vehicle, "2030-01-10", "2030-01-15", today)
        .unwrap();

    // un tercero sin rol staff no puede cancelar
    assert!(matches!(
        fx.rentals.cancel_rental_at(rental.id, stranger, false, today),
        Err(AppError::Forbidden(_))
    ));
    // una vez empezado solo queda la devolución
    assert!(matches!(
        fx.rentals
            .cancel_rental_at(rental.id, owner, false, d("2030-01-10")),
        Err(AppError::AlreadyStarted)
    ));

    let outcome = fx
        .rentals
        .cancel_rental_at(rental.id, owner, false, today)
        .unwrap();
    assert_eq!(outcome.rental.status, RentalStatus::Cancelled);
    assert_eq!(outcome.rental.total, Decimal::ZERO);

    // staff puede cancelar rentals ajenos
    let second = fx
        .rentals
        .rent_at(owner, vehicle, "2030-02-01", "2030-02-05", today)
        .unwrap();
    let by_staff = fx
        .rentals
        .cancel_rental_at(second.id, stranger, true, today)
        .unwrap();
    assert_eq!(by_staff.rental.status, RentalStatus::Cancelled);
}

#[test]
fn overdue_rentals_still_block_new_bookings_and_cannot_be_cancelled() {
    let fx = fixture();
    let renter = add_user(&fx.store, "bob", Role::Individual);
    let other = add_user(&fx.store, "eve", Role::Individual);
    let vehicle = add_vehicle(&fx.store, VehicleType::Car, 100);

    let rental = fx
        .rentals
        .rent_at(renter, vehicle, "2030-01-02", "2030-01-05", d(TODAY))
        .unwrap();

    // pasó la fecha de fin sin devolución
    let reconciler = ReconcilerService::new(fx.store.clone());
    reconciler.refresh_overdue_flags_at(d("2030-01-08")).unwrap();

    fx.store.read(|data| {
        assert_eq!(data.rentals[&rental.id].status, RentalStatus::Overdue);
    });

    // sigue activo: bloquea el solape
    assert!(matches!(
        fx.rentals
            .rent_at(other, vehicle, "2030-01-04", "2030-01-09", d("2030-01-04")),
        Err(AppError::DateConflict)
    ));
    // y ya no es cancelable: el estado dejó de ser rented
    assert!(matches!(
        fx.rentals
            .cancel_rental_at(rental.id, renter, true, d("2030-01-01")),
        Err(AppError::NotCancellable)
    ));

    // la devolución tardía lo cierra igual
    let outcome = fx
        .rentals
        .return_vehicle_at(rental.id, d("2030-01-08"))
        .unwrap();
    assert_eq!(outcome.rental.status, RentalStatus::Returned);
    assert_eq!(outcome.rental.overdue_days, Some(3));
}

#[test]
fn rentals_for_user_come_newest_first() {
    let fx = fixture();
    let renter = add_user(&fx.store, "bob", Role::Individual);
    let vehicle_a = add_vehicle(&fx.store, VehicleType::Car, 100);
    let vehicle_b = add_vehicle(&fx.store, VehicleType::Truck, 100);
    let today = d(TODAY);

    fx.rentals
        .rent_at(renter, vehicle_a, "2030-01-10", "2030-01-12", today)
        .unwrap();
    fx.rentals
        .rent_at(renter, vehicle_b, "2030-02-01", "2030-02-03", today)
        .unwrap();

    let history = fx.rentals.rentals_for_user(renter);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].start_date, d("2030-02-01"));
    assert_eq!(history[1].start_date, d("2030-01-10"));
    // el historial anota el vehículo
    assert_eq!(history[0].brand, "Toyota");
}
