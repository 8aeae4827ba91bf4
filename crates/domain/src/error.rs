// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Guest name is empty, too short, or too long.
    InvalidGuestName(String),
    /// Phone number does not match the mobile-number pattern.
    InvalidPhoneNumber(String),
    /// Email address is malformed.
    InvalidEmail(String),
    /// Table size is outside the permitted range.
    InvalidTableSize {
        /// The invalid size value.
        size: u8,
    },
    /// Special requests text exceeds the length bound.
    InvalidSpecialRequests(String),
    /// Status-change reason exceeds the length bound.
    InvalidReason(String),
    /// A reason is required but was empty or missing.
    MissingReason,
    /// Arrival time is not strictly in the future.
    ArrivalTimeNotFuture {
        /// The invalid arrival time.
        arrival_time: time::OffsetDateTime,
    },
    /// Arrival time falls outside business hours.
    OutsideBusinessHours {
        /// The wall-clock hour of the invalid arrival time.
        hour: u8,
    },
    /// Status string is not a valid reservation status.
    InvalidStatus(String),
    /// The requested status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGuestName(msg) => write!(f, "Invalid guest name: {msg}"),
            Self::InvalidPhoneNumber(msg) => write!(f, "Invalid phone number: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email address: {msg}"),
            Self::InvalidTableSize { size } => {
                write!(f, "Invalid table size: {size}. Must be between 1 and 20")
            }
            Self::InvalidSpecialRequests(msg) => write!(f, "Invalid special requests: {msg}"),
            Self::InvalidReason(msg) => write!(f, "Invalid reason: {msg}"),
            Self::MissingReason => {
                write!(f, "A non-empty reason is required for this status change")
            }
            Self::ArrivalTimeNotFuture { arrival_time } => {
                write!(f, "Arrival time {arrival_time} must be in the future")
            }
            Self::OutsideBusinessHours { hour } => {
                write!(
                    f,
                    "Arrival hour {hour} is outside business hours (10:00-22:00)"
                )
            }
            Self::InvalidStatus(status) => write!(f, "Invalid reservation status: '{status}'"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Cannot change status from {from} to {to}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
