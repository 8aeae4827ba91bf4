// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::auth::AuthError;
use crate::pagination::QueryPolicyError;
use seatwise::CoreError;
use seatwise_domain::DomainError;
use seatwise_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Lower-layer errors are translated explicitly and never leaked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// Invalid list/query options were provided.
    InvalidQuery {
        /// The option that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The candidate time slot overlaps another active reservation.
    SchedulingConflict {
        /// The offending field.
        field: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The requested status change is not permitted.
    InvalidStateTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// A required reason was empty or missing.
    MissingReason,
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The actor may not perform this action.
    Forbidden {
        /// A human-readable description of the violation.
        message: String,
    },
    /// The persistence layer failed or timed out.
    StoreUnavailable {
        /// A description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidQuery { field, message } => {
                write!(f, "Invalid query option '{field}': {message}")
            }
            Self::SchedulingConflict { field, message } => {
                write!(f, "Scheduling conflict on '{field}': {message}")
            }
            Self::InvalidStateTransition { from, to } => {
                write!(f, "Cannot change status from {from} to {to}")
            }
            Self::MissingReason => {
                write!(f, "A non-empty reason is required")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Forbidden { message } => {
                write!(f, "Forbidden: {message}")
            }
            Self::StoreUnavailable { message } => {
                write!(f, "Store unavailable: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Forbidden {
            message: err.to_string(),
        }
    }
}

impl From<QueryPolicyError> for ApiError {
    fn from(err: QueryPolicyError) -> Self {
        let field: &str = match err {
            QueryPolicyError::InvalidPage { .. } => "page",
            QueryPolicyError::InvalidLimit { .. } => "limit",
        };
        Self::InvalidQuery {
            field: field.to_string(),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidGuestName(msg) => ApiError::InvalidInput {
            field: String::from("guest_name"),
            message: msg,
        },
        DomainError::InvalidPhoneNumber(msg) => ApiError::InvalidInput {
            field: String::from("phone_number"),
            message: msg,
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidTableSize { size } => ApiError::InvalidInput {
            field: String::from("table_size"),
            message: format!("Invalid table size: {size}. Must be between 1 and 20"),
        },
        DomainError::InvalidSpecialRequests(msg) => ApiError::InvalidInput {
            field: String::from("special_requests"),
            message: msg,
        },
        DomainError::InvalidReason(msg) => ApiError::InvalidInput {
            field: String::from("reason"),
            message: msg,
        },
        DomainError::MissingReason => ApiError::MissingReason,
        DomainError::ArrivalTimeNotFuture { arrival_time } => ApiError::InvalidInput {
            field: String::from("arrival_time"),
            message: format!("Arrival time {arrival_time} must be in the future"),
        },
        DomainError::OutsideBusinessHours { hour } => ApiError::InvalidInput {
            field: String::from("arrival_time"),
            message: format!("Arrival hour {hour} is outside business hours (10:00-22:00)"),
        },
        DomainError::InvalidStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid reservation status: '{status}'"),
        },
        DomainError::InvalidStatusTransition { from, to } => {
            ApiError::InvalidStateTransition { from, to }
        }
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::SchedulingConflict { arrival_time, .. } => ApiError::SchedulingConflict {
            field: String::from("arrival_time"),
            message: format!(
                "An active reservation already exists within two hours of {arrival_time}"
            ),
        },
        CoreError::NotEditable { .. } => ApiError::Forbidden {
            message: String::from("Reservation state does not allow editing"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Unknown-id lookups become `ResourceNotFound`; everything else surfaces
/// as `StoreUnavailable` (conditional-write races are handled separately
/// by the transition handlers, which know the attempted target status).
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::ReservationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Reservation"),
            message: format!("Reservation {id} does not exist"),
        },
        other => ApiError::StoreUnavailable {
            message: other.to_string(),
        },
    }
}
