// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::PersistenceError;
use seatwise::{NewReservation, Reservation};
use seatwise_domain::ReservationStatus;
use time::macros::datetime;

use super::helpers::{seed_reservation, test_now, test_store, user_actor};

#[test]
fn test_insert_assigns_sequential_ids() {
    let mut store = test_store();

    let first = seed_reservation(&mut store, 7, datetime!(2026-03-11 18:00 UTC));
    let second = seed_reservation(&mut store, 7, datetime!(2026-03-12 18:00 UTC));

    assert_eq!(first.reservation_id(), Some(1));
    assert_eq!(second.reservation_id(), Some(2));
}

#[test]
fn test_round_trip_preserves_all_fields() {
    let mut store = test_store();

    let input = NewReservation {
        user_id: 7,
        guest_name: String::from("Li Wei"),
        phone_number: String::from("13812345678"),
        email: String::from("li@example.com"),
        arrival_time: datetime!(2026-03-11 18:00 UTC),
        table_size: 4,
        special_requests: Some(String::from("Window seat, please")),
    };
    let created = Reservation::create(input, Some(user_actor(7)), test_now()).unwrap();
    let id = store.insert_reservation(&created).unwrap();

    let fetched = store.find_by_id(id).unwrap();

    assert_eq!(fetched, created.with_id(id));
}

#[test]
fn test_round_trip_preserves_history_order_and_actor() {
    let mut store = test_store();
    let stored = seed_reservation(&mut store, 7, datetime!(2026-03-11 18:00 UTC));

    let fetched = store
        .find_by_id(stored.reservation_id().unwrap())
        .unwrap();

    assert_eq!(fetched.history().len(), 1);
    let entry = fetched.history().last().unwrap();
    assert_eq!(entry.status, ReservationStatus::Requested);
    assert_eq!(entry.changed_at, test_now());
    let actor = entry.changed_by.as_ref().unwrap();
    assert_eq!(actor.id, "7");
    assert_eq!(actor.actor_type, "user");
}

#[test]
fn test_find_unknown_id_is_not_found() {
    let store = test_store();

    let result = store.find_by_id(999);

    assert_eq!(result, Err(PersistenceError::ReservationNotFound(999)));
}

#[test]
fn test_update_details_changes_fields_but_not_history() {
    let mut store = test_store();
    let stored = seed_reservation(&mut store, 7, datetime!(2026-03-11 18:00 UTC));
    let id = stored.reservation_id().unwrap();

    let updated = seatwise::apply(
        &stored,
        seatwise::Command::UpdateDetails {
            updates: seatwise::ReservationUpdate {
                guest_name: Some(String::from("Zhang San")),
                table_size: Some(6),
                ..seatwise::ReservationUpdate::default()
            },
        },
        Some(user_actor(7)),
        datetime!(2026-03-10 11:00 UTC),
    )
    .unwrap()
    .reservation;
    store.update_details(&updated).unwrap();

    let fetched = store.find_by_id(id).unwrap();
    assert_eq!(fetched.guest_name(), "Zhang San");
    assert_eq!(fetched.table_size(), 6);
    assert_eq!(fetched.status(), ReservationStatus::Requested);
    assert_eq!(fetched.history().len(), 1);
    assert_eq!(fetched.updated_at(), datetime!(2026-03-10 11:00 UTC));
}

#[test]
fn test_update_details_on_unpersisted_reservation_fails() {
    let mut store = test_store();
    let unsaved = Reservation::create(
        super::helpers::input_at(7, datetime!(2026-03-11 18:00 UTC)),
        None,
        test_now(),
    )
    .unwrap();

    let result = store.update_details(&unsaved);

    assert_eq!(result, Err(PersistenceError::NotPersisted));
}
