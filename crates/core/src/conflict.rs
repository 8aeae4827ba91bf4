// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Double-booking detection.
//!
//! The store supplies the candidate set (the owner's active reservations);
//! the window policy itself lives here and in the domain crate, fixed at
//! two hours either side of the candidate arrival time.

use crate::state::Reservation;
use seatwise_domain::within_conflict_window;
use time::OffsetDateTime;

/// Finds an active reservation whose arrival time conflicts with the
/// candidate time.
///
/// Reservations that are not active (`Cancelled`, `Completed`) never
/// conflict. When editing an existing reservation, pass its id as
/// `exclude` so it does not conflict with itself.
///
/// # Arguments
///
/// * `candidate_arrival` - The arrival time being requested
/// * `others` - The owner's existing reservations
/// * `exclude` - A reservation id to skip, if any
#[must_use]
pub fn find_conflicting<'a>(
    candidate_arrival: OffsetDateTime,
    others: &'a [Reservation],
    exclude: Option<i64>,
) -> Option<&'a Reservation> {
    others.iter().find(|other| {
        if !other.is_active() {
            return false;
        }
        if exclude.is_some() && other.reservation_id() == exclude {
            return false;
        }
        within_conflict_window(candidate_arrival, other.arrival_time())
    })
}
