// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The single status-changing path.
//!
//! Every status change in the system flows through [`transition`]; there is
//! no direct status mutation anywhere else, so a change can never happen
//! without its matching history entry.

use crate::error::CoreError;
use crate::state::Reservation;
use seatwise_audit::{Actor, StatusChange};
use seatwise_domain::{ReservationStatus, validate_reason};
use time::OffsetDateTime;

/// The result of a successful status transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// The reservation after the transition.
    pub reservation: Reservation,
    /// The history entry recording this transition. Already appended to the
    /// reservation's history; returned separately so the store can persist
    /// the delta.
    pub change: StatusChange,
}

/// Moves a reservation to a new status.
///
/// The transition must be legal per the status state machine. Cancelling
/// requires a non-empty reason, which also becomes the reservation's
/// cancellation reason. Exactly one history entry is appended.
///
/// # Arguments
///
/// * `reservation` - The current reservation (unmodified)
/// * `target` - The requested status
/// * `reason` - The reason for the change; required when cancelling
/// * `actor` - The initiating actor; `None` for system-initiated changes
/// * `now` - The current instant
///
/// # Errors
///
/// Returns an error if:
/// - The transition is not in the legal-transition table
/// - The target is `Cancelled` and the reason is empty or missing
/// - A supplied reason exceeds the length bound
pub fn transition(
    reservation: &Reservation,
    target: ReservationStatus,
    reason: Option<&str>,
    actor: Option<Actor>,
    now: OffsetDateTime,
) -> Result<TransitionOutcome, CoreError> {
    reservation.status().validate_transition(target)?;

    let reason: Option<String> = match (target, reason) {
        (ReservationStatus::Cancelled, supplied) => {
            let supplied: &str = supplied.unwrap_or_default();
            validate_reason(supplied)?;
            Some(supplied.trim().to_string())
        }
        (_, Some(supplied)) if !supplied.trim().is_empty() => {
            validate_reason(supplied)?;
            Some(supplied.trim().to_string())
        }
        _ => None,
    };

    let change: StatusChange = StatusChange::new(target, reason, now, actor);

    let mut updated: Reservation = reservation.clone();
    updated.record_transition(change.clone(), now);

    debug_assert!(
        updated
            .history()
            .last()
            .is_some_and(|last| last.status == updated.status()),
        "history must end with the current status"
    );

    Ok(TransitionOutcome {
        reservation: updated,
        change,
    })
}
