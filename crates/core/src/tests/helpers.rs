// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{NewReservation, Reservation};
use seatwise_audit::Actor;
use time::OffsetDateTime;
use time::macros::datetime;

/// A fixed "current" instant all core tests share.
pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-10 09:00 UTC)
}

/// Tomorrow evening, well within business hours.
pub fn tomorrow_dinner() -> OffsetDateTime {
    datetime!(2026-03-11 18:00 UTC)
}

pub fn user_actor(id: i64) -> Actor {
    Actor::new(id.to_string(), String::from("user"))
}

pub fn admin_actor() -> Actor {
    Actor::new(String::from("1"), String::from("admin"))
}

pub fn valid_input(user_id: i64) -> NewReservation {
    NewReservation {
        user_id,
        guest_name: String::from("Li Wei"),
        phone_number: String::from("13812345678"),
        email: String::from("li@example.com"),
        arrival_time: tomorrow_dinner(),
        table_size: 4,
        special_requests: None,
    }
}

/// Creates a persisted-looking reservation owned by `user_id`.
pub fn requested_reservation(user_id: i64, reservation_id: i64) -> Reservation {
    Reservation::create(valid_input(user_id), Some(user_actor(user_id)), test_now())
        .expect("valid input must create")
        .with_id(reservation_id)
}
