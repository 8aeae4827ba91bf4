// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! `ReservationInfo` is the single reservation view every transport
//! adapter shapes from; adapters never reach into core types directly.

use seatwise::Reservation;
use seatwise_audit::StatusChange;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Request to create a reservation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateReservationRequest {
    /// Name of the arriving guest.
    pub guest_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Contact email address.
    pub email: String,
    /// Requested arrival time.
    #[serde(with = "time::serde::rfc3339")]
    pub arrival_time: OffsetDateTime,
    /// Number of people at the table.
    pub table_size: u8,
    /// Optional free-text requests.
    pub special_requests: Option<String>,
}

/// Request to edit a reservation's details. `None` fields are unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UpdateReservationRequest {
    /// New guest name.
    pub guest_name: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New arrival time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub arrival_time: Option<OffsetDateTime>,
    /// New table size.
    pub table_size: Option<u8>,
    /// New special requests text; an empty string clears the field.
    pub special_requests: Option<String>,
}

/// Request to change a reservation's status (staff operation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    /// The target status: `Approved`, `Cancelled`, or `Completed`.
    pub status: String,
    /// The reason for the change; required when cancelling.
    pub reason: Option<String>,
}

/// Request to cancel a reservation (owner operation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CancelReservationRequest {
    /// The cancellation reason. Must be non-empty after trimming.
    pub reason: String,
}

/// List options shared by the paginated read paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ListOptions {
    /// 1-based page number; defaults to 1.
    pub page: Option<u32>,
    /// Page size; defaults depend on the operation.
    pub limit: Option<u32>,
    /// Restrict to a status.
    pub status: Option<String>,
    /// Sort column: `arrival_time` (default) or `created_at`.
    pub sort_by: Option<String>,
    /// Sort direction: `asc` or `desc` (default).
    pub sort_order: Option<String>,
}

/// Admin-only filters for listing all reservations, on top of
/// [`ListOptions`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AllReservationsRequest {
    /// Pagination and sorting.
    #[serde(flatten)]
    pub options: ListOptions,
    /// Restrict to reservations owned by this user.
    pub user_id: Option<i64>,
    /// Case-insensitive substring match over guest name and email.
    pub search: Option<String>,
    /// Keep reservations arriving at or after this instant.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    /// Keep reservations arriving strictly before this instant.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
}

/// Serializable view of one status history entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusChangeInfo {
    /// The status the reservation entered.
    pub status: String,
    /// The reason supplied with the change, if any.
    pub reason: Option<String>,
    /// When the change occurred.
    #[serde(with = "time::serde::rfc3339")]
    pub changed_at: OffsetDateTime,
    /// Id of the initiating actor; absent for system-initiated changes.
    pub changed_by_id: Option<String>,
    /// Role of the initiating actor; absent for system-initiated changes.
    pub changed_by_role: Option<String>,
}

/// Serializable view of a reservation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationInfo {
    /// The reservation id.
    pub reservation_id: i64,
    /// The owning user's id.
    pub user_id: i64,
    /// Name of the arriving guest.
    pub guest_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Contact email address.
    pub email: String,
    /// Requested arrival time.
    #[serde(with = "time::serde::rfc3339")]
    pub arrival_time: OffsetDateTime,
    /// Number of people at the table.
    pub table_size: u8,
    /// Current lifecycle status.
    pub status: String,
    /// Optional free-text requests.
    pub special_requests: Option<String>,
    /// Cancellation reason, once cancelled.
    pub cancellation_reason: Option<String>,
    /// Whether details may currently be edited (derived from status).
    pub can_edit: bool,
    /// Whether the reservation may currently be cancelled (derived from
    /// status).
    pub can_cancel: bool,
    /// The full status history, oldest first.
    pub status_history: Vec<StatusChangeInfo>,
    /// When the reservation was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the reservation was last mutated.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

fn change_to_info(change: &StatusChange) -> StatusChangeInfo {
    StatusChangeInfo {
        status: change.status.as_str().to_string(),
        reason: change.reason.clone(),
        changed_at: change.changed_at,
        changed_by_id: change.changed_by.as_ref().map(|actor| actor.id.clone()),
        changed_by_role: change
            .changed_by
            .as_ref()
            .map(|actor| actor.actor_type.clone()),
    }
}

/// Shapes a reservation into its serializable view.
///
/// Unpersisted reservations fall back to an id of 0, which no store ever
/// assigns; handlers only shape reservations that came back from the store.
#[must_use]
pub(crate) fn reservation_to_info(reservation: &Reservation) -> ReservationInfo {
    ReservationInfo {
        reservation_id: reservation.reservation_id().unwrap_or(0),
        user_id: reservation.user_id(),
        guest_name: reservation.guest_name().to_string(),
        phone_number: reservation.phone_number().to_string(),
        email: reservation.email().to_string(),
        arrival_time: reservation.arrival_time(),
        table_size: reservation.table_size(),
        status: reservation.status().as_str().to_string(),
        special_requests: reservation.special_requests().map(ToString::to_string),
        cancellation_reason: reservation.cancellation_reason().map(ToString::to_string),
        can_edit: reservation.can_edit(),
        can_cancel: reservation.can_cancel(),
        status_history: reservation.history().entries().iter().map(change_to_info).collect(),
        created_at: reservation.created_at(),
        updated_at: reservation.updated_at(),
    }
}
