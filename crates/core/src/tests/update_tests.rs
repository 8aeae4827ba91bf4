// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, CoreError, ReservationUpdate, apply, transition};
use seatwise_domain::{DomainError, ReservationStatus};
use time::macros::datetime;

use super::helpers::{requested_reservation, test_now, user_actor};

fn update_command(updates: ReservationUpdate) -> Command {
    Command::UpdateDetails { updates }
}

#[test]
fn test_detail_update_changes_fields_without_history_entry() {
    let reservation = requested_reservation(7, 1);

    let outcome = apply(
        &reservation,
        update_command(ReservationUpdate {
            guest_name: Some(String::from("Zhang San")),
            table_size: Some(6),
            ..ReservationUpdate::default()
        }),
        Some(user_actor(7)),
        datetime!(2026-03-10 11:00 UTC),
    )
    .unwrap();

    assert_eq!(outcome.reservation.guest_name(), "Zhang San");
    assert_eq!(outcome.reservation.table_size(), 6);
    assert_eq!(outcome.reservation.history().len(), 1);
    assert_eq!(outcome.change, None);
    assert_eq!(
        outcome.reservation.updated_at(),
        datetime!(2026-03-10 11:00 UTC)
    );
    // created_at is immutable
    assert_eq!(outcome.reservation.created_at(), reservation.created_at());
}

#[test]
fn test_update_preserves_status() {
    let reservation = requested_reservation(7, 1);

    let outcome = apply(
        &reservation,
        update_command(ReservationUpdate {
            email: Some(String::from("new@example.com")),
            ..ReservationUpdate::default()
        }),
        Some(user_actor(7)),
        test_now(),
    )
    .unwrap();

    assert_eq!(outcome.reservation.status(), ReservationStatus::Requested);
}

#[test]
fn test_update_arrival_time_revalidates_business_hours() {
    let reservation = requested_reservation(7, 1);

    let result = apply(
        &reservation,
        update_command(ReservationUpdate {
            arrival_time: Some(datetime!(2026-03-12 08:00 UTC)),
            ..ReservationUpdate::default()
        }),
        Some(user_actor(7)),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::OutsideBusinessHours { hour: 8 }
        ))
    ));
}

#[test]
fn test_update_arrival_time_rejects_past() {
    let reservation = requested_reservation(7, 1);

    let result = apply(
        &reservation,
        update_command(ReservationUpdate {
            arrival_time: Some(datetime!(2026-03-01 18:00 UTC)),
            ..ReservationUpdate::default()
        }),
        Some(user_actor(7)),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ArrivalTimeNotFuture { .. }
        ))
    ));
}

#[test]
fn test_update_rejected_when_not_editable() {
    let reservation = requested_reservation(7, 1);
    let cancelled = transition(
        &reservation,
        ReservationStatus::Cancelled,
        Some("Guest called"),
        Some(user_actor(7)),
        test_now(),
    )
    .unwrap()
    .reservation;

    let result = apply(
        &cancelled,
        update_command(ReservationUpdate {
            guest_name: Some(String::from("Zhang San")),
            ..ReservationUpdate::default()
        }),
        Some(user_actor(7)),
        test_now(),
    );

    assert!(matches!(result, Err(CoreError::NotEditable { .. })));
}

#[test]
fn test_invalid_field_leaves_reservation_unchanged() {
    let reservation = requested_reservation(7, 1);
    let before = reservation.clone();

    let result = apply(
        &reservation,
        update_command(ReservationUpdate {
            guest_name: Some(String::from("X")),
            ..ReservationUpdate::default()
        }),
        Some(user_actor(7)),
        test_now(),
    );

    assert!(result.is_err());
    assert_eq!(reservation, before);
}

#[test]
fn test_blank_special_requests_clears_field() {
    let reservation = requested_reservation(7, 1);
    let with_requests = apply(
        &reservation,
        update_command(ReservationUpdate {
            special_requests: Some(String::from("Window seat")),
            ..ReservationUpdate::default()
        }),
        Some(user_actor(7)),
        test_now(),
    )
    .unwrap()
    .reservation;
    assert_eq!(with_requests.special_requests(), Some("Window seat"));

    let cleared = apply(
        &with_requests,
        update_command(ReservationUpdate {
            special_requests: Some(String::new()),
            ..ReservationUpdate::default()
        }),
        Some(user_actor(7)),
        test_now(),
    )
    .unwrap()
    .reservation;

    assert_eq!(cleared.special_requests(), None);
}

#[test]
fn test_empty_update_is_a_no_op_on_fields() {
    let reservation = requested_reservation(7, 1);

    let outcome = apply(
        &reservation,
        update_command(ReservationUpdate::default()),
        Some(user_actor(7)),
        datetime!(2026-03-10 12:00 UTC),
    )
    .unwrap();

    assert_eq!(outcome.reservation.guest_name(), reservation.guest_name());
    assert_eq!(
        outcome.reservation.arrival_time(),
        reservation.arrival_time()
    );
    assert_eq!(
        outcome.reservation.updated_at(),
        datetime!(2026-03-10 12:00 UTC)
    );
}

#[test]
fn test_transition_command_routes_through_state_machine() {
    let reservation = requested_reservation(7, 1);

    let outcome = apply(
        &reservation,
        Command::Transition {
            target: ReservationStatus::Approved,
            reason: None,
        },
        Some(user_actor(1)),
        test_now(),
    )
    .unwrap();

    assert_eq!(outcome.reservation.status(), ReservationStatus::Approved);
    assert!(outcome.change.is_some());
}
