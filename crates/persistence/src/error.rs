// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// The requested reservation was not found.
    ReservationNotFound(i64),
    /// The reservation has no persisted id yet.
    NotPersisted,
    /// A conditional status write found a different current status.
    ///
    /// The caller lost a race against a concurrent transition; the write
    /// was not applied.
    StatusConflict {
        /// The reservation whose status moved underneath the caller.
        reservation_id: i64,
        /// The status the caller expected to still be current.
        expected: String,
    },
    /// A stored value could not be interpreted.
    DataCorruption(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::ReservationNotFound(id) => write!(f, "Reservation not found: {id}"),
            Self::NotPersisted => {
                write!(f, "Reservation has not been persisted yet")
            }
            Self::StatusConflict {
                reservation_id,
                expected,
            } => {
                write!(
                    f,
                    "Reservation {reservation_id} is no longer in status {expected}"
                )
            }
            Self::DataCorruption(msg) => write!(f, "Stored data is invalid: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
