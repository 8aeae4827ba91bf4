// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rusqlite::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// Initializes the database schema.
///
/// Timestamps are stored as Unix seconds so range scans compare correctly
/// regardless of the offset a client supplied. History rows are append-only:
/// nothing in this crate updates or deletes them.
///
/// # Arguments
///
/// * `conn` - The database connection to initialize
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    // Enable foreign key enforcement
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS reservations (
            reservation_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            guest_name TEXT NOT NULL,
            phone_number TEXT NOT NULL,
            email TEXT NOT NULL,
            arrival_time INTEGER NOT NULL,
            table_size INTEGER NOT NULL CHECK(table_size BETWEEN 1 AND 20),
            status TEXT NOT NULL
                CHECK(status IN ('Requested', 'Approved', 'Cancelled', 'Completed')),
            special_requests TEXT,
            cancellation_reason TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reservations_user_created
            ON reservations(user_id, created_at DESC);

        CREATE INDEX IF NOT EXISTS idx_reservations_status
            ON reservations(status);

        CREATE INDEX IF NOT EXISTS idx_reservations_arrival_status
            ON reservations(arrival_time, status);

        CREATE TABLE IF NOT EXISTS reservation_status_history (
            history_id INTEGER PRIMARY KEY AUTOINCREMENT,
            reservation_id INTEGER NOT NULL,
            status TEXT NOT NULL
                CHECK(status IN ('Requested', 'Approved', 'Cancelled', 'Completed')),
            reason TEXT,
            changed_at INTEGER NOT NULL,
            changed_by_json TEXT,
            FOREIGN KEY(reservation_id) REFERENCES reservations(reservation_id)
        );

        CREATE INDEX IF NOT EXISTS idx_history_by_reservation
            ON reservation_status_history(reservation_id, history_id);
        ",
    )?;

    Ok(())
}
