// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::{AuthenticatedActor, Role};
use crate::handlers::create_reservation;
use crate::request_response::{CreateReservationRequest, ReservationInfo};
use seatwise_persistence::ReservationStore;
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_store() -> ReservationStore {
    ReservationStore::new_in_memory().expect("in-memory store must initialize")
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-10 09:00 UTC)
}

pub fn user(id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(id, Role::User)
}

pub fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(1, Role::Admin)
}

pub fn create_request_at(arrival_time: OffsetDateTime) -> CreateReservationRequest {
    CreateReservationRequest {
        guest_name: String::from("Li Wei"),
        phone_number: String::from("13812345678"),
        email: String::from("li@example.com"),
        arrival_time,
        table_size: 4,
        special_requests: None,
    }
}

pub fn create_request() -> CreateReservationRequest {
    create_request_at(datetime!(2026-03-11 18:00 UTC))
}

/// Creates a reservation through the service for `actor`.
pub fn seed_reservation(
    store: &mut ReservationStore,
    actor: &AuthenticatedActor,
    arrival_time: OffsetDateTime,
) -> ReservationInfo {
    create_reservation(store, actor, create_request_at(arrival_time), test_now())
        .expect("seed reservation must succeed")
}
