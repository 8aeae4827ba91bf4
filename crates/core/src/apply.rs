// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, ReservationUpdate};
use crate::error::CoreError;
use crate::state::Reservation;
use crate::transition::{TransitionOutcome, transition};
use seatwise_audit::{Actor, StatusChange};
use seatwise_domain::{
    validate_arrival_time, validate_email, validate_guest_name, validate_phone_number,
    validate_special_requests, validate_table_size,
};
use time::OffsetDateTime;

/// The result of applying a command to a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// The reservation after the command.
    pub reservation: Reservation,
    /// The history entry produced by the command. `Some` for transitions,
    /// `None` for detail updates, which never touch the audit trail.
    pub change: Option<StatusChange>,
}

/// Applies a command to a reservation, producing the updated reservation
/// and, for transitions, the audit entry.
///
/// The input reservation is never modified; failures leave no side effects.
///
/// Conflict detection is the caller's concern: when an update changes the
/// arrival time, run [`crate::find_conflicting`] over the owner's active
/// reservations before applying.
///
/// # Arguments
///
/// * `reservation` - The current reservation (unmodified)
/// * `command` - The command to apply
/// * `actor` - The initiating actor, recorded on transitions
/// * `now` - The current instant
///
/// # Errors
///
/// Returns an error if:
/// - A detail update targets a reservation whose status does not allow
///   editing
/// - Any changed field violates its domain rule
/// - A transition violates the state machine or its reason rules
pub fn apply(
    reservation: &Reservation,
    command: Command,
    actor: Option<Actor>,
    now: OffsetDateTime,
) -> Result<ApplyOutcome, CoreError> {
    match command {
        Command::UpdateDetails { updates } => {
            let updated: Reservation = apply_details(reservation, updates, now)?;
            Ok(ApplyOutcome {
                reservation: updated,
                change: None,
            })
        }
        Command::Transition { target, reason } => {
            let outcome: TransitionOutcome =
                transition(reservation, target, reason.as_deref(), actor, now)?;
            Ok(ApplyOutcome {
                reservation: outcome.reservation,
                change: Some(outcome.change),
            })
        }
    }
}

/// Validates and applies a detail update within the fixed field allowlist.
fn apply_details(
    reservation: &Reservation,
    updates: ReservationUpdate,
    now: OffsetDateTime,
) -> Result<Reservation, CoreError> {
    if !reservation.can_edit() {
        return Err(CoreError::NotEditable {
            status: reservation.status().as_str().to_string(),
        });
    }

    let mut updated: Reservation = reservation.clone();

    if let Some(guest_name) = updates.guest_name {
        let guest_name: String = guest_name.trim().to_string();
        validate_guest_name(&guest_name)?;
        updated.set_guest_name(guest_name);
    }

    if let Some(phone_number) = updates.phone_number {
        let phone_number: String = phone_number.trim().to_string();
        validate_phone_number(&phone_number)?;
        updated.set_phone_number(phone_number);
    }

    if let Some(email) = updates.email {
        let email: String = email.trim().to_lowercase();
        validate_email(&email)?;
        updated.set_email(email);
    }

    if let Some(arrival_time) = updates.arrival_time {
        validate_arrival_time(arrival_time, now)?;
        updated.set_arrival_time(arrival_time);
    }

    if let Some(table_size) = updates.table_size {
        validate_table_size(table_size)?;
        updated.set_table_size(table_size);
    }

    if let Some(special_requests) = updates.special_requests {
        let trimmed: String = special_requests.trim().to_string();
        if trimmed.is_empty() {
            updated.set_special_requests(None);
        } else {
            validate_special_requests(&trimmed)?;
            updated.set_special_requests(Some(trimmed));
        }
    }

    updated.touch(now);
    Ok(updated)
}
