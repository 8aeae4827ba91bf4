// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Arrival-time rules and the double-booking conflict window.
//!
//! Business hours and the conflict window are fixed business policy,
//! not configurable per call.

use crate::error::DomainError;
use time::{Duration, OffsetDateTime};

/// First hour of the day (inclusive) at which arrivals are accepted.
pub const OPENING_HOUR: u8 = 10;

/// Hour of the day (exclusive) after which arrivals are no longer accepted.
pub const CLOSING_HOUR: u8 = 22;

/// Half-width of the interval around an arrival time used to detect
/// double-booking. Two active reservations for the same user whose arrival
/// times lie within this window of each other conflict.
pub const CONFLICT_WINDOW: Duration = Duration::hours(2);

/// Validates that an arrival time is strictly in the future and falls
/// within business hours.
///
/// The hour check uses the wall-clock hour of the arrival time as supplied
/// by the caller; arrival times carry the restaurant-local offset.
///
/// # Arguments
///
/// * `arrival_time` - The candidate arrival time
/// * `now` - The current instant
///
/// # Errors
///
/// Returns an error if:
/// - The arrival time is not strictly after `now`
/// - The wall-clock hour is outside `[10:00, 22:00)`
pub fn validate_arrival_time(
    arrival_time: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    if arrival_time <= now {
        return Err(DomainError::ArrivalTimeNotFuture { arrival_time });
    }

    let hour: u8 = arrival_time.hour();
    if !(OPENING_HOUR..CLOSING_HOUR).contains(&hour) {
        return Err(DomainError::OutsideBusinessHours { hour });
    }

    Ok(())
}

/// Returns true if two arrival times lie within the conflict window of
/// each other.
///
/// The window is inclusive at both ends: arrivals exactly two hours apart
/// still conflict.
#[must_use]
pub fn within_conflict_window(a: OffsetDateTime, b: OffsetDateTime) -> bool {
    (a - b).abs() <= CONFLICT_WINDOW
}
