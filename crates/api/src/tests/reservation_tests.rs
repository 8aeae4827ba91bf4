// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::{
    create_reservation, get_reservation, list_reservations_between, list_today_reservations,
    update_reservation,
};
use crate::request_response::{CreateReservationRequest, UpdateReservationRequest};
use time::macros::datetime;

use super::helpers::{admin, create_request, create_request_at, seed_reservation, test_now, test_store, user};

#[test]
fn test_create_reservation_returns_requested_snapshot() {
    let mut store = test_store();

    let info = create_reservation(&mut store, &user(7), create_request(), test_now()).unwrap();

    assert_eq!(info.status, "Requested");
    assert_eq!(info.user_id, 7);
    assert_eq!(info.status_history.len(), 1);
    assert!(info.can_edit);
    assert!(info.can_cancel);
    assert_eq!(info.reservation_id, 1);
    assert_eq!(info.guest_name, "Li Wei");
}

#[test]
fn test_create_reservation_history_names_the_creator() {
    let mut store = test_store();

    let info = create_reservation(&mut store, &user(7), create_request(), test_now()).unwrap();

    let entry = &info.status_history[0];
    assert_eq!(entry.status, "Requested");
    assert_eq!(entry.changed_by_id.as_deref(), Some("7"));
    assert_eq!(entry.changed_by_role.as_deref(), Some("user"));
}

#[test]
fn test_create_reservation_rejects_past_arrival() {
    let mut store = test_store();

    let result = create_reservation(
        &mut store,
        &user(7),
        create_request_at(datetime!(2026-03-09 18:00 UTC)),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "arrival_time"
    ));
}

#[test]
fn test_create_reservation_rejects_out_of_hours_arrival() {
    let mut store = test_store();

    let result = create_reservation(
        &mut store,
        &user(7),
        create_request_at(datetime!(2026-03-11 09:00 UTC)),
        test_now(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "arrival_time"
    ));
}

#[test]
fn test_create_reservation_rejects_invalid_email() {
    let mut store = test_store();
    let request = CreateReservationRequest {
        email: String::from("not-an-email"),
        ..create_request()
    };

    let result = create_reservation(&mut store, &user(7), request, test_now());

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "email"
    ));
}

#[test]
fn test_failed_create_writes_nothing() {
    let mut store = test_store();
    let request = CreateReservationRequest {
        table_size: 0,
        ..create_request()
    };

    let _ = create_reservation(&mut store, &user(7), request, test_now());

    assert_eq!(
        store.find_by_id(1),
        Err(seatwise_persistence::PersistenceError::ReservationNotFound(
            1
        ))
    );
}

#[test]
fn test_get_reservation_round_trips_through_store() {
    let mut store = test_store();
    let created = seed_reservation(&mut store, &user(7), datetime!(2026-03-11 18:00 UTC));

    let fetched = get_reservation(&store, &user(7), created.reservation_id).unwrap();

    assert_eq!(fetched, created);
}

#[test]
fn test_get_unknown_reservation_is_not_found() {
    let store = test_store();

    let result = get_reservation(&store, &admin(), 42);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_update_reservation_changes_allowed_fields_only() {
    let mut store = test_store();
    let created = seed_reservation(&mut store, &user(7), datetime!(2026-03-11 18:00 UTC));

    let updated = update_reservation(
        &mut store,
        &user(7),
        created.reservation_id,
        UpdateReservationRequest {
            guest_name: Some(String::from("Zhang San")),
            special_requests: Some(String::from("Quiet corner")),
            ..UpdateReservationRequest::default()
        },
        test_now(),
    )
    .unwrap();

    assert_eq!(updated.guest_name, "Zhang San");
    assert_eq!(updated.special_requests.as_deref(), Some("Quiet corner"));
    assert_eq!(updated.status, "Requested");
    assert_eq!(updated.status_history.len(), 1);
    assert_eq!(updated.created_at, created.created_at);
}

#[test]
fn test_update_unknown_reservation_is_not_found() {
    let mut store = test_store();

    let result = update_reservation(
        &mut store,
        &user(7),
        42,
        UpdateReservationRequest::default(),
        test_now(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_list_today_reservations_only_returns_the_current_day() {
    let mut store = test_store();
    // now is 2026-03-10; seed one reservation today and one tomorrow
    seed_reservation(&mut store, &user(7), datetime!(2026-03-10 19:00 UTC));
    seed_reservation(&mut store, &user(8), datetime!(2026-03-11 18:00 UTC));

    let today = list_today_reservations(&store, None, test_now()).unwrap();

    assert_eq!(today.len(), 1);
    assert_eq!(
        today[0].arrival_time,
        datetime!(2026-03-10 19:00 UTC)
    );
}

#[test]
fn test_list_today_reservations_rejects_unknown_status() {
    let store = test_store();

    let result = list_today_reservations(&store, Some("Pending"), test_now());

    assert!(matches!(
        result,
        Err(ApiError::InvalidQuery { field, .. }) if field == "status"
    ));
}

#[test]
fn test_list_reservations_between_is_sorted_ascending() {
    let mut store = test_store();
    seed_reservation(&mut store, &user(7), datetime!(2026-03-12 20:00 UTC));
    seed_reservation(&mut store, &user(8), datetime!(2026-03-11 12:00 UTC));

    let items = list_reservations_between(
        &store,
        datetime!(2026-03-11 00:00 UTC),
        datetime!(2026-03-13 00:00 UTC),
        None,
    )
    .unwrap();

    assert_eq!(items.len(), 2);
    assert!(items[0].arrival_time < items[1].arrival_time);
}

#[test]
fn test_list_reservations_between_rejects_inverted_range() {
    let store = test_store();

    let result = list_reservations_between(
        &store,
        datetime!(2026-03-13 00:00 UTC),
        datetime!(2026-03-11 00:00 UTC),
        None,
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidQuery { field, .. }) if field == "end_date"
    ));
}
