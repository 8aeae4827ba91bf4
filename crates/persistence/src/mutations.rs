// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side store operations.
//!
//! Every multi-statement write runs inside a transaction; a failure rolls
//! back and leaves the persisted reservation untouched. History rows are
//! only ever inserted.

use rusqlite::{Connection, params};
use seatwise::Reservation;
use seatwise_audit::StatusChange;
use seatwise_domain::ReservationStatus;
use tracing::{debug, info};

use crate::data_models::ActorData;
use crate::error::PersistenceError;

fn insert_history_row(
    conn: &Connection,
    reservation_id: i64,
    change: &StatusChange,
) -> Result<(), PersistenceError> {
    let changed_by_json: Option<String> = change
        .changed_by
        .as_ref()
        .map(|actor| {
            serde_json::to_string(&ActorData {
                id: actor.id.clone(),
                actor_type: actor.actor_type.clone(),
            })
        })
        .transpose()?;

    conn.execute(
        "INSERT INTO reservation_status_history
             (reservation_id, status, reason, changed_at, changed_by_json)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            reservation_id,
            change.status.as_str(),
            change.reason,
            change.changed_at.unix_timestamp(),
            changed_by_json,
        ],
    )?;
    Ok(())
}

/// Inserts a new reservation together with its initial history entries.
///
/// # Returns
///
/// The id assigned to the reservation.
///
/// # Errors
///
/// Returns an error if any insert fails; nothing is persisted in that case.
pub fn insert_reservation(
    conn: &mut Connection,
    reservation: &Reservation,
) -> Result<i64, PersistenceError> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO reservations
             (user_id, guest_name, phone_number, email, arrival_time, table_size,
              status, special_requests, cancellation_reason, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            reservation.user_id(),
            reservation.guest_name(),
            reservation.phone_number(),
            reservation.email(),
            reservation.arrival_time().unix_timestamp(),
            reservation.table_size(),
            reservation.status().as_str(),
            reservation.special_requests(),
            reservation.cancellation_reason(),
            reservation.created_at().unix_timestamp(),
            reservation.updated_at().unix_timestamp(),
        ],
    )?;

    let reservation_id: i64 = tx.last_insert_rowid();

    for change in reservation.history().entries() {
        insert_history_row(&tx, reservation_id, change)?;
    }

    tx.commit()?;

    info!(
        reservation_id,
        user_id = reservation.user_id(),
        "Inserted reservation"
    );

    Ok(reservation_id)
}

/// Updates a reservation's editable details. Status, history, and
/// `created_at` are never touched by this path.
///
/// # Errors
///
/// Returns `PersistenceError::NotPersisted` if the reservation has no id,
/// `PersistenceError::ReservationNotFound` if the row is gone, or another
/// error if the update fails.
pub fn update_details(
    conn: &mut Connection,
    reservation: &Reservation,
) -> Result<(), PersistenceError> {
    let reservation_id: i64 = reservation
        .reservation_id()
        .ok_or(PersistenceError::NotPersisted)?;

    let rows: usize = conn.execute(
        "UPDATE reservations
             SET guest_name = ?1, phone_number = ?2, email = ?3, arrival_time = ?4,
                 table_size = ?5, special_requests = ?6, updated_at = ?7
             WHERE reservation_id = ?8",
        params![
            reservation.guest_name(),
            reservation.phone_number(),
            reservation.email(),
            reservation.arrival_time().unix_timestamp(),
            reservation.table_size(),
            reservation.special_requests(),
            reservation.updated_at().unix_timestamp(),
            reservation_id,
        ],
    )?;

    if rows == 0 {
        return Err(PersistenceError::ReservationNotFound(reservation_id));
    }

    debug!(reservation_id, "Updated reservation details");
    Ok(())
}

/// Applies a status transition as an atomic conditional write.
///
/// The status column is updated only if it still equals `expected`; the
/// history entry is inserted in the same transaction. Two racing
/// transitions cannot both succeed: the loser observes zero affected rows
/// and receives `PersistenceError::StatusConflict`.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation` - The reservation after the transition
/// * `change` - The history entry produced by the transition
/// * `expected` - The status the reservation held before the transition
///
/// # Errors
///
/// Returns `StatusConflict` if the current status no longer matches,
/// `ReservationNotFound` if the row is gone, `NotPersisted` if the
/// reservation has no id, or another error if the write fails.
pub fn apply_transition(
    conn: &mut Connection,
    reservation: &Reservation,
    change: &StatusChange,
    expected: ReservationStatus,
) -> Result<(), PersistenceError> {
    let reservation_id: i64 = reservation
        .reservation_id()
        .ok_or(PersistenceError::NotPersisted)?;

    let tx = conn.transaction()?;

    let rows: usize = tx.execute(
        "UPDATE reservations
             SET status = ?1, cancellation_reason = ?2, updated_at = ?3
             WHERE reservation_id = ?4 AND status = ?5",
        params![
            reservation.status().as_str(),
            reservation.cancellation_reason(),
            reservation.updated_at().unix_timestamp(),
            reservation_id,
            expected.as_str(),
        ],
    )?;

    if rows == 0 {
        let exists: i64 = tx.query_row(
            "SELECT COUNT(*) FROM reservations WHERE reservation_id = ?1",
            params![reservation_id],
            |row| row.get(0),
        )?;
        // Dropping the transaction rolls back; no partial write escapes.
        return Err(if exists > 0 {
            PersistenceError::StatusConflict {
                reservation_id,
                expected: expected.as_str().to_string(),
            }
        } else {
            PersistenceError::ReservationNotFound(reservation_id)
        });
    }

    insert_history_row(&tx, reservation_id, change)?;

    tx.commit()?;

    info!(
        reservation_id,
        status = reservation.status().as_str(),
        "Applied status transition"
    );

    Ok(())
}
