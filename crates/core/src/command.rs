// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use seatwise_domain::ReservationStatus;
use time::OffsetDateTime;

/// A partial update of a reservation's editable details.
///
/// Only the fields on this struct may ever change through an edit; this is
/// the fixed allowlist. `None` means "leave unchanged". Clearing special
/// requests is expressed by `Some(String::new())`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReservationUpdate {
    /// New guest name, if changing.
    pub guest_name: Option<String>,
    /// New phone number, if changing.
    pub phone_number: Option<String>,
    /// New email address, if changing.
    pub email: Option<String>,
    /// New arrival time, if changing.
    pub arrival_time: Option<OffsetDateTime>,
    /// New table size, if changing.
    pub table_size: Option<u8>,
    /// New special requests text, if changing.
    pub special_requests: Option<String>,
}

impl ReservationUpdate {
    /// Returns true if no field is being changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.guest_name.is_none()
            && self.phone_number.is_none()
            && self.email.is_none()
            && self.arrival_time.is_none()
            && self.table_size.is_none()
            && self.special_requests.is_none()
    }

    /// Returns true if the update changes the arrival time.
    ///
    /// Arrival-time changes trigger re-validation and conflict detection;
    /// detail-only updates do not.
    #[must_use]
    pub const fn changes_arrival_time(&self) -> bool {
        self.arrival_time.is_some()
    }
}

/// A command against an existing reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Edit details within the fixed field allowlist. Does not change
    /// status and does not append a history entry.
    UpdateDetails {
        /// The fields to change.
        updates: ReservationUpdate,
    },
    /// Move the reservation to a new status via the state machine.
    Transition {
        /// The requested status.
        target: ReservationStatus,
        /// The reason for the change; required when cancelling.
        reason: Option<String>,
    },
}
