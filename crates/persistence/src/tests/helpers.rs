// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ReservationStore;
use seatwise::{NewReservation, Reservation};
use seatwise_audit::Actor;
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_store() -> ReservationStore {
    ReservationStore::new_in_memory().expect("in-memory store must initialize")
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-10 09:00 UTC)
}

pub fn user_actor(id: i64) -> Actor {
    Actor::new(id.to_string(), String::from("user"))
}

pub fn input_at(user_id: i64, arrival_time: OffsetDateTime) -> NewReservation {
    NewReservation {
        user_id,
        guest_name: String::from("Li Wei"),
        phone_number: String::from("13812345678"),
        email: String::from("li@example.com"),
        arrival_time,
        table_size: 4,
        special_requests: None,
    }
}

/// Creates a reservation and persists it, returning the stored copy.
pub fn seed_reservation(
    store: &mut ReservationStore,
    user_id: i64,
    arrival_time: OffsetDateTime,
) -> Reservation {
    let reservation = Reservation::create(
        input_at(user_id, arrival_time),
        Some(user_actor(user_id)),
        test_now(),
    )
    .expect("valid input must create");

    let id = store
        .insert_reservation(&reservation)
        .expect("insert must succeed");
    reservation.with_id(id)
}
