// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use seatwise_audit::{Actor, StatusChange, StatusHistory};
use seatwise_domain::{
    ReservationStatus, validate_arrival_time, validate_email, validate_guest_name,
    validate_phone_number, validate_special_requests, validate_table_size,
};
use time::OffsetDateTime;

/// Input for creating a reservation.
///
/// Field validation happens in [`Reservation::create`], not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// The owning user.
    pub user_id: i64,
    /// Name of the arriving guest.
    pub guest_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Contact email address.
    pub email: String,
    /// Requested arrival time.
    pub arrival_time: OffsetDateTime,
    /// Number of people at the table.
    pub table_size: u8,
    /// Optional free-text requests.
    pub special_requests: Option<String>,
}

/// A restaurant table reservation.
///
/// Fields are private: details change only through [`crate::apply()`] and
/// status changes only through [`crate::transition()`], so no caller can
/// bypass validation, the status state machine, or the audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the reservation has not been persisted yet.
    reservation_id: Option<i64>,
    user_id: i64,
    guest_name: String,
    phone_number: String,
    email: String,
    arrival_time: OffsetDateTime,
    table_size: u8,
    status: ReservationStatus,
    special_requests: Option<String>,
    cancellation_reason: Option<String>,
    history: StatusHistory,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Reservation {
    /// Creates a new reservation in `Requested` status.
    ///
    /// All field rules are validated, free-text fields are trimmed, and a
    /// single implicit history entry is recorded for the initial status.
    ///
    /// # Arguments
    ///
    /// * `new` - The reservation input
    /// * `actor` - The actor creating the reservation, recorded in history
    /// * `now` - The current instant; becomes `created_at` and `updated_at`
    ///
    /// # Errors
    ///
    /// Returns an error if any field violates its domain rule, including an
    /// arrival time in the past or outside business hours.
    pub fn create(
        new: NewReservation,
        actor: Option<Actor>,
        now: OffsetDateTime,
    ) -> Result<Self, CoreError> {
        let guest_name: String = new.guest_name.trim().to_string();
        let phone_number: String = new.phone_number.trim().to_string();
        let email: String = new.email.trim().to_lowercase();
        let special_requests: Option<String> = new
            .special_requests
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        validate_guest_name(&guest_name)?;
        validate_phone_number(&phone_number)?;
        validate_email(&email)?;
        validate_arrival_time(new.arrival_time, now)?;
        validate_table_size(new.table_size)?;
        if let Some(text) = &special_requests {
            validate_special_requests(text)?;
        }

        let status: ReservationStatus = ReservationStatus::Requested;
        let mut history: StatusHistory = StatusHistory::new();
        history.append(StatusChange::new(status, None, now, actor));

        Ok(Self {
            reservation_id: None,
            user_id: new.user_id,
            guest_name,
            phone_number,
            email,
            arrival_time: new.arrival_time,
            table_size: new.table_size,
            status,
            special_requests,
            cancellation_reason: None,
            history,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a reservation from values previously persisted by the store.
    ///
    /// No validation is performed; the values must come from a trusted
    /// store that only ever persisted validated reservations.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn restore(
        reservation_id: i64,
        user_id: i64,
        guest_name: String,
        phone_number: String,
        email: String,
        arrival_time: OffsetDateTime,
        table_size: u8,
        status: ReservationStatus,
        special_requests: Option<String>,
        cancellation_reason: Option<String>,
        history: StatusHistory,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            reservation_id: Some(reservation_id),
            user_id,
            guest_name,
            phone_number,
            email,
            arrival_time,
            table_size,
            status,
            special_requests,
            cancellation_reason,
            history,
            created_at,
            updated_at,
        }
    }

    /// Returns a copy of this reservation carrying its persisted id.
    #[must_use]
    pub fn with_id(mut self, reservation_id: i64) -> Self {
        self.reservation_id = Some(reservation_id);
        self
    }

    /// The canonical id, once persisted.
    #[must_use]
    pub const fn reservation_id(&self) -> Option<i64> {
        self.reservation_id
    }

    /// The owning user's id.
    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }

    /// The guest's name.
    #[must_use]
    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }

    /// The guest's contact phone number.
    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// The guest's contact email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The requested arrival time.
    #[must_use]
    pub const fn arrival_time(&self) -> OffsetDateTime {
        self.arrival_time
    }

    /// The number of people at the table.
    #[must_use]
    pub const fn table_size(&self) -> u8 {
        self.table_size
    }

    /// The current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Free-text special requests, if any.
    #[must_use]
    pub fn special_requests(&self) -> Option<&str> {
        self.special_requests.as_deref()
    }

    /// The cancellation reason, set only by a transition to `Cancelled`.
    #[must_use]
    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    /// The append-only status history.
    #[must_use]
    pub const fn history(&self) -> &StatusHistory {
        &self.history
    }

    /// When the reservation was created. Immutable once set.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// When the reservation was last mutated.
    #[must_use]
    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    /// Whether the reservation still occupies a time slot.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether the reservation's details may currently be edited.
    ///
    /// Derived from status; never stored.
    #[must_use]
    pub const fn can_edit(&self) -> bool {
        self.status.allows_editing()
    }

    /// Whether the reservation may currently be cancelled.
    ///
    /// Derived from status; never stored.
    #[must_use]
    pub const fn can_cancel(&self) -> bool {
        self.status.allows_cancellation()
    }

    // Crate-internal mutators used by `apply` and `transition`. These are
    // the only paths that touch status, history, or details.

    pub(crate) fn set_guest_name(&mut self, guest_name: String) {
        self.guest_name = guest_name;
    }

    pub(crate) fn set_phone_number(&mut self, phone_number: String) {
        self.phone_number = phone_number;
    }

    pub(crate) fn set_email(&mut self, email: String) {
        self.email = email;
    }

    pub(crate) const fn set_arrival_time(&mut self, arrival_time: OffsetDateTime) {
        self.arrival_time = arrival_time;
    }

    pub(crate) const fn set_table_size(&mut self, table_size: u8) {
        self.table_size = table_size;
    }

    pub(crate) fn set_special_requests(&mut self, special_requests: Option<String>) {
        self.special_requests = special_requests;
    }

    pub(crate) const fn touch(&mut self, now: OffsetDateTime) {
        self.updated_at = now;
    }

    pub(crate) fn record_transition(&mut self, change: StatusChange, now: OffsetDateTime) {
        self.status = change.status;
        if change.status == ReservationStatus::Cancelled {
            self.cancellation_reason = change.reason.clone();
        }
        self.history.append(change);
        self.updated_at = now;
    }
}
