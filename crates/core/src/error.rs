// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use seatwise_domain::DomainError;
use time::OffsetDateTime;

/// Errors that can occur during lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The candidate arrival time overlaps another active reservation
    /// owned by the same user.
    SchedulingConflict {
        /// The offending arrival time.
        arrival_time: OffsetDateTime,
        /// The id of the conflicting reservation, when it is persisted.
        conflicting_reservation_id: Option<i64>,
    },
    /// The reservation's status does not allow detail edits.
    NotEditable {
        /// The current status.
        status: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::SchedulingConflict { arrival_time, .. } => {
                write!(
                    f,
                    "An active reservation already exists within two hours of {arrival_time}"
                )
            }
            Self::NotEditable { status } => {
                write!(f, "Reservation in status {status} does not allow editing")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
