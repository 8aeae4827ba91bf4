// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Seatwise Reservation System.
//!
//! This crate provides `SQLite` persistence for reservations and their
//! append-only status history. It is built on `rusqlite`: schema bootstrap
//! via `execute_batch`, transactions for every multi-statement write, and
//! an atomic status-keyed conditional update for transitions.
//!
//! In-memory databases back development and tests; file-backed databases
//! get WAL mode for better read concurrency.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use rusqlite::Connection;
use seatwise::Reservation;
use seatwise_audit::StatusChange;
use seatwise_domain::ReservationStatus;
use std::path::Path;
use time::OffsetDateTime;
use tracing::info;

mod data_models;
mod error;
mod mutations;
mod queries;
mod schema;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use queries::{ReservationFilter, SortField, SortOrder};

/// SQLite-backed store for reservations.
///
/// All durable state lives here; the service layers above are stateless
/// between calls.
pub struct ReservationStore {
    conn: Connection,
}

impl ReservationStore {
    /// Creates a store backed by an in-memory `SQLite` database.
    ///
    /// Each call receives an isolated database instance, which keeps tests
    /// deterministic and independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;
        schema::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates a store backed by a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)
            .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

        // Enable WAL mode for better read concurrency
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

        schema::initialize_schema(&conn)?;
        info!("Opened file-backed reservation store");
        Ok(Self { conn })
    }

    /// Inserts a new reservation together with its initial history.
    ///
    /// # Returns
    ///
    /// The id assigned to the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails; nothing is persisted then.
    pub fn insert_reservation(
        &mut self,
        reservation: &Reservation,
    ) -> Result<i64, PersistenceError> {
        mutations::insert_reservation(&mut self.conn, reservation)
    }

    /// Retrieves a reservation by id, history included.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReservationNotFound` for unknown ids.
    pub fn find_by_id(&self, reservation_id: i64) -> Result<Reservation, PersistenceError> {
        queries::find_by_id(&self.conn, reservation_id)
    }

    /// Retrieves one page of reservations matching a filter, plus the
    /// total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_page(
        &self,
        filter: &ReservationFilter,
        sort_field: SortField,
        sort_order: SortOrder,
        page: u32,
        limit: u32,
    ) -> Result<(Vec<Reservation>, u64), PersistenceError> {
        queries::find_page(&self.conn, filter, sort_field, sort_order, page, limit)
    }

    /// Retrieves the active reservations owned by a user, optionally
    /// excluding one id. This is the conflict-detection candidate set.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_active_for_user(
        &self,
        user_id: i64,
        exclude: Option<i64>,
    ) -> Result<Vec<Reservation>, PersistenceError> {
        queries::find_active_for_user(&self.conn, user_id, exclude)
    }

    /// Retrieves reservations arriving within `[from, to)`, optionally
    /// filtered by status, sorted by arrival time ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_between(
        &self,
        from: OffsetDateTime,
        to: OffsetDateTime,
        status: Option<ReservationStatus>,
    ) -> Result<Vec<Reservation>, PersistenceError> {
        queries::find_between(&self.conn, from, to, status)
    }

    /// Updates a reservation's editable details without touching status or
    /// history.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation is unknown or the write fails.
    pub fn update_details(&mut self, reservation: &Reservation) -> Result<(), PersistenceError> {
        mutations::update_details(&mut self.conn, reservation)
    }

    /// Applies a status transition as an atomic conditional write keyed on
    /// the expected current status, appending the history entry in the
    /// same transaction.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::StatusConflict` if a concurrent
    /// transition won the race, or another error if the write fails.
    pub fn apply_transition(
        &mut self,
        reservation: &Reservation,
        change: &StatusChange,
        expected: ReservationStatus,
    ) -> Result<(), PersistenceError> {
        mutations::apply_transition(&mut self.conn, reservation, change, expected)
    }
}
