// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CoreError, NewReservation, Reservation};
use seatwise_domain::{DomainError, ReservationStatus};
use time::macros::datetime;

use super::helpers::{test_now, user_actor, valid_input};

#[test]
fn test_create_starts_requested_with_one_history_entry() {
    let reservation =
        Reservation::create(valid_input(7), Some(user_actor(7)), test_now()).unwrap();

    assert_eq!(reservation.status(), ReservationStatus::Requested);
    assert_eq!(reservation.history().len(), 1);
    assert!(reservation.can_edit());
    assert!(reservation.can_cancel());
    assert_eq!(reservation.reservation_id(), None);
}

#[test]
fn test_create_history_entry_matches_status_and_actor() {
    let reservation =
        Reservation::create(valid_input(7), Some(user_actor(7)), test_now()).unwrap();

    let entry = reservation.history().last().unwrap();
    assert_eq!(entry.status, ReservationStatus::Requested);
    assert_eq!(entry.reason, None);
    assert_eq!(entry.changed_at, test_now());
    assert_eq!(entry.changed_by.as_ref().unwrap().id, "7");
}

#[test]
fn test_create_without_actor_records_none() {
    let reservation = Reservation::create(valid_input(7), None, test_now()).unwrap();

    assert_eq!(reservation.history().last().unwrap().changed_by, None);
}

#[test]
fn test_create_sets_timestamps_to_now() {
    let reservation = Reservation::create(valid_input(7), None, test_now()).unwrap();

    assert_eq!(reservation.created_at(), test_now());
    assert_eq!(reservation.updated_at(), test_now());
}

#[test]
fn test_create_trims_and_lowercases_contact_fields() {
    let input = NewReservation {
        guest_name: String::from("  Li Wei  "),
        email: String::from("  Li@Example.COM "),
        ..valid_input(7)
    };

    let reservation = Reservation::create(input, None, test_now()).unwrap();

    assert_eq!(reservation.guest_name(), "Li Wei");
    assert_eq!(reservation.email(), "li@example.com");
}

#[test]
fn test_create_blank_special_requests_becomes_none() {
    let input = NewReservation {
        special_requests: Some(String::from("   ")),
        ..valid_input(7)
    };

    let reservation = Reservation::create(input, None, test_now()).unwrap();

    assert_eq!(reservation.special_requests(), None);
}

#[test]
fn test_create_rejects_past_arrival_time() {
    let input = NewReservation {
        arrival_time: datetime!(2026-03-09 18:00 UTC),
        ..valid_input(7)
    };

    let result = Reservation::create(input, None, test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ArrivalTimeNotFuture { .. }
        ))
    ));
}

#[test]
fn test_create_rejects_arrival_outside_business_hours() {
    let input = NewReservation {
        arrival_time: datetime!(2026-03-11 23:00 UTC),
        ..valid_input(7)
    };

    let result = Reservation::create(input, None, test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::OutsideBusinessHours { hour: 23 }
        ))
    ));
}

#[test]
fn test_create_rejects_bad_phone_number() {
    let input = NewReservation {
        phone_number: String::from("12345"),
        ..valid_input(7)
    };

    let result = Reservation::create(input, None, test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidPhoneNumber(
            _
        )))
    ));
}

#[test]
fn test_create_rejects_oversized_table() {
    let input = NewReservation {
        table_size: 21,
        ..valid_input(7)
    };

    let result = Reservation::create(input, None, test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidTableSize {
            size: 21
        }))
    ));
}
