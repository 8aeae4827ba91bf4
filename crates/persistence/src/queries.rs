// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side store operations.
//!
//! Optional filter fields bind as `NULL` and collapse their predicate, so
//! every query is a single static statement.

use rusqlite::{Connection, Result as SqliteResult, params};
use seatwise::Reservation;
use seatwise_audit::{Actor, StatusChange, StatusHistory};
use seatwise_domain::ReservationStatus;
use std::str::FromStr;
use time::OffsetDateTime;

use crate::data_models::{ActorData, ReservationRow, StatusChangeRow};
use crate::error::PersistenceError;

/// Filter applied to reservation list queries. `None` fields do not
/// constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Restrict to reservations owned by this user.
    pub user_id: Option<i64>,
    /// Restrict to reservations in this status.
    pub status: Option<ReservationStatus>,
    /// Case-insensitive substring match over guest name and email.
    pub search: Option<String>,
    /// Keep reservations arriving at or after this instant.
    pub arrival_from: Option<OffsetDateTime>,
    /// Keep reservations arriving strictly before this instant.
    pub arrival_to: Option<OffsetDateTime>,
}

/// Sortable reservation columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Sort by arrival time.
    #[default]
    ArrivalTime,
    /// Sort by creation time.
    CreatedAt,
}

impl SortField {
    const fn column(self) -> &'static str {
        match self {
            Self::ArrivalTime => "arrival_time",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Earliest first.
    Ascending,
    /// Latest first.
    #[default]
    Descending,
}

impl SortOrder {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

const RESERVATION_COLUMNS: &str = "reservation_id, user_id, guest_name, phone_number, email, \
     arrival_time, table_size, status, special_requests, cancellation_reason, \
     created_at, updated_at";

const FILTER_PREDICATE: &str = "(?1 IS NULL OR user_id = ?1) \
     AND (?2 IS NULL OR status = ?2) \
     AND (?3 IS NULL OR LOWER(guest_name) LIKE ?3 OR LOWER(email) LIKE ?3) \
     AND (?4 IS NULL OR arrival_time >= ?4) \
     AND (?5 IS NULL OR arrival_time < ?5)";

fn read_row(row: &rusqlite::Row<'_>) -> SqliteResult<ReservationRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
        row.get(10)?,
        row.get(11)?,
    ))
}

fn datetime_from_unix(seconds: i64) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|e| PersistenceError::DataCorruption(format!("invalid timestamp {seconds}: {e}")))
}

fn status_from_str(status: &str) -> Result<ReservationStatus, PersistenceError> {
    ReservationStatus::from_str(status).map_err(|e| PersistenceError::DataCorruption(e.to_string()))
}

fn actor_from_json(json: Option<&str>) -> Result<Option<Actor>, PersistenceError> {
    json.map(|text| {
        let data: ActorData = serde_json::from_str(text)?;
        Ok(Actor::new(data.id, data.actor_type))
    })
    .transpose()
}

/// Loads the full status history for a reservation, in append order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// interpreted.
pub fn load_history(
    conn: &Connection,
    reservation_id: i64,
) -> Result<StatusHistory, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT status, reason, changed_at, changed_by_json
             FROM reservation_status_history
             WHERE reservation_id = ?1
             ORDER BY history_id ASC",
    )?;

    let rows: Vec<StatusChangeRow> = stmt
        .query_map(params![reservation_id], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .collect::<SqliteResult<Vec<StatusChangeRow>>>()?;

    let mut entries: Vec<StatusChange> = Vec::with_capacity(rows.len());
    for (status, reason, changed_at, changed_by_json) in rows {
        entries.push(StatusChange::new(
            status_from_str(&status)?,
            reason,
            datetime_from_unix(changed_at)?,
            actor_from_json(changed_by_json.as_deref())?,
        ));
    }

    Ok(StatusHistory::from_entries(entries))
}

fn row_to_reservation(
    conn: &Connection,
    row: ReservationRow,
) -> Result<Reservation, PersistenceError> {
    let (
        reservation_id,
        user_id,
        guest_name,
        phone_number,
        email,
        arrival_time,
        table_size,
        status,
        special_requests,
        cancellation_reason,
        created_at,
        updated_at,
    ) = row;

    let table_size: u8 = u8::try_from(table_size).map_err(|_| {
        PersistenceError::DataCorruption(format!("invalid table size {table_size}"))
    })?;

    let history: StatusHistory = load_history(conn, reservation_id)?;

    Ok(Reservation::restore(
        reservation_id,
        user_id,
        guest_name,
        phone_number,
        email,
        datetime_from_unix(arrival_time)?,
        table_size,
        status_from_str(&status)?,
        special_requests,
        cancellation_reason,
        history,
        datetime_from_unix(created_at)?,
        datetime_from_unix(updated_at)?,
    ))
}

/// Retrieves a reservation by id, history included.
///
/// # Errors
///
/// Returns `PersistenceError::ReservationNotFound` if no such reservation
/// exists, or another error if the query fails.
pub fn find_by_id(conn: &Connection, reservation_id: i64) -> Result<Reservation, PersistenceError> {
    let row_result: SqliteResult<ReservationRow> = conn.query_row(
        &format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE reservation_id = ?1"),
        params![reservation_id],
        read_row,
    );

    match row_result {
        Ok(row) => row_to_reservation(conn, row),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            Err(PersistenceError::ReservationNotFound(reservation_id))
        }
        Err(e) => Err(PersistenceError::DatabaseError(e.to_string())),
    }
}

type FilterParams = (
    Option<i64>,
    Option<&'static str>,
    Option<String>,
    Option<i64>,
    Option<i64>,
);

fn filter_params(filter: &ReservationFilter) -> FilterParams {
    (
        filter.user_id,
        filter.status.map(|status| status.as_str()),
        filter
            .search
            .as_ref()
            .map(|term| format!("%{}%", term.to_lowercase())),
        filter.arrival_from.map(OffsetDateTime::unix_timestamp),
        filter.arrival_to.map(OffsetDateTime::unix_timestamp),
    )
}

/// Retrieves one page of reservations matching a filter, plus the total
/// match count.
///
/// The count runs in the same connection but not the same snapshot as the
/// page read; list consistency is best-effort.
///
/// # Errors
///
/// Returns an error if either query fails or a stored value cannot be
/// interpreted.
pub fn find_page(
    conn: &Connection,
    filter: &ReservationFilter,
    sort_field: SortField,
    sort_order: SortOrder,
    page: u32,
    limit: u32,
) -> Result<(Vec<Reservation>, u64), PersistenceError> {
    let (user_id, status, search, from, to) = filter_params(filter);

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM reservations WHERE {FILTER_PREDICATE}"),
        params![user_id, status, search, from, to],
        |row| row.get(0),
    )?;

    let order_column: &str = sort_field.column();
    let order_keyword: &str = sort_order.keyword();
    let offset: i64 = i64::from(page.saturating_sub(1)) * i64::from(limit);

    let mut stmt = conn.prepare(&format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations
             WHERE {FILTER_PREDICATE}
             ORDER BY {order_column} {order_keyword}, reservation_id {order_keyword}
             LIMIT ?6 OFFSET ?7"
    ))?;

    let rows: Vec<ReservationRow> = stmt
        .query_map(
            params![user_id, status, search, from, to, i64::from(limit), offset],
            read_row,
        )?
        .collect::<SqliteResult<Vec<ReservationRow>>>()?;

    let mut reservations: Vec<Reservation> = Vec::with_capacity(rows.len());
    for row in rows {
        reservations.push(row_to_reservation(conn, row)?);
    }

    let total: u64 = u64::try_from(total).unwrap_or(0);
    Ok((reservations, total))
}

/// Retrieves all active (`Requested`/`Approved`) reservations owned by a
/// user, optionally excluding one reservation id.
///
/// This is the candidate set for conflict detection; the window policy
/// itself is applied by the core crate.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// interpreted.
pub fn find_active_for_user(
    conn: &Connection,
    user_id: i64,
    exclude: Option<i64>,
) -> Result<Vec<Reservation>, PersistenceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations
             WHERE user_id = ?1
               AND status IN ('Requested', 'Approved')
               AND (?2 IS NULL OR reservation_id <> ?2)
             ORDER BY arrival_time ASC"
    ))?;

    let rows: Vec<ReservationRow> = stmt
        .query_map(params![user_id, exclude], read_row)?
        .collect::<SqliteResult<Vec<ReservationRow>>>()?;

    let mut reservations: Vec<Reservation> = Vec::with_capacity(rows.len());
    for row in rows {
        reservations.push(row_to_reservation(conn, row)?);
    }

    Ok(reservations)
}

/// Retrieves reservations arriving within `[from, to)`, optionally
/// filtered by status, sorted by arrival time ascending.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// interpreted.
pub fn find_between(
    conn: &Connection,
    from: OffsetDateTime,
    to: OffsetDateTime,
    status: Option<ReservationStatus>,
) -> Result<Vec<Reservation>, PersistenceError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations
             WHERE arrival_time >= ?1
               AND arrival_time < ?2
               AND (?3 IS NULL OR status = ?3)
             ORDER BY arrival_time ASC"
    ))?;

    let rows: Vec<ReservationRow> = stmt
        .query_map(
            params![
                from.unix_timestamp(),
                to.unix_timestamp(),
                status.map(|s| s.as_str())
            ],
            read_row,
        )?
        .collect::<SqliteResult<Vec<ReservationRow>>>()?;

    let mut reservations: Vec<Reservation> = Vec::with_capacity(rows.len());
    for row in rows {
        reservations.push(row_to_reservation(conn, row)?);
    }

    Ok(reservations)
}
